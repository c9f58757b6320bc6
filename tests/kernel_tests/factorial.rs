use super::*;
use num_bigint::BigInt;

fn naive_factorial(n: u32) -> BigNum {
  BigNum::from((1..=n).fold(BigInt::from(1), |acc, i| acc * i))
}

#[test]
fn lookup_values() {
  let ctx = ctx();
  assert_eq!(factorial(&ctx, &num("0")), num("1"));
  assert_eq!(factorial(&ctx, &num("1")), num("1"));
  assert_eq!(factorial(&ctx, &num("5")), num("120"));
  assert_eq!(factorial(&ctx, &num("9")), num("362880"));
}

#[test]
fn ten() {
  assert_eq!(factorial(&ctx(), &num("10")), num("3628800"));
}

#[test]
fn odd_argument() {
  assert_eq!(factorial(&ctx(), &num("11")), num("39916800"));
}

#[test]
fn printed() {
  let ctx = ctx();
  insta::assert_snapshot!(
    factorial(&ctx, &num("20")).to_string(),
    @"2432902008176640000"
  );
  insta::assert_snapshot!(
    factorial(&ctx, &num("30")).to_string(),
    @"2.6525285981219105863630848e+32"
  );
}

#[test]
fn matches_direct_product() {
  let ctx = ctx();
  for n in 0..120u32 {
    assert_eq!(factorial(&ctx, &BigNum::from(n)), naive_factorial(n), "{n}!");
  }
}

#[test]
fn large_arguments_stay_exact() {
  let ctx = ctx();
  let even = factorial(&ctx, &num("5000"));
  assert_eq!(even, naive_factorial(5000));
  assert_eq!(even.exponent(), Some(16325));
  assert_eq!(even.significant_digits(), 15077);

  let odd = factorial(&ctx, &num("5001"));
  assert_eq!(odd, &even * &num("5001"));
  assert_eq!(odd.significant_digits(), 15081);
}

#[test]
fn exceeds_working_precision_exactly() {
  let ctx = NumericContext::with_precision(10).unwrap();
  let value = factorial(&ctx, &num("40"));
  assert_eq!(
    value,
    num("815915283247897734345611269596115894272000000000")
  );
}

#[test]
fn recurrence() {
  let ctx = ctx();
  for n in 1..60u32 {
    let n = BigNum::from(n);
    let previous = factorial(&ctx, &(&n - &num("1")));
    assert_eq!(factorial(&ctx, &n), &n * &previous);
  }
}

#[test]
fn invalid_arguments_are_nan() {
  let ctx = ctx();
  assert!(factorial(&ctx, &num("-1")).is_nan());
  assert!(factorial(&ctx, &num("2.5")).is_nan());
  assert!(factorial(&ctx, &BigNum::nan()).is_nan());
  assert!(factorial(&ctx, &BigNum::infinity(false)).is_nan());
}
