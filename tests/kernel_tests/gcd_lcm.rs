use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod gcd {
  use super::*;

  #[test]
  fn small_values() {
    assert_eq!(gcd(&num("12"), &num("18")), num("6"));
    assert_eq!(gcd(&num("17"), &num("5")), num("1"));
    assert_eq!(gcd(&num("0"), &num("5")), num("5"));
    assert_eq!(gcd(&num("5"), &num("0")), num("5"));
    assert_eq!(gcd(&num("0"), &num("0")), num("0"));
  }

  #[test]
  fn never_negative() {
    assert_eq!(gcd(&num("-12"), &num("18")), num("6"));
    assert_eq!(gcd(&num("12"), &num("-18")), num("6"));
    assert_eq!(gcd(&num("-12"), &num("-18")), num("6"));
  }

  #[test]
  fn beyond_native_range() {
    let a = num("123456789012345678901234567890");
    let b = num("987654321098765432109876543210");
    assert_eq!(gcd(&a, &b), num("9000000000900000000090"));
  }

  #[test]
  fn list() {
    assert_eq!(gcd_all(&[]), num("0"));
    assert_eq!(gcd_all(&[num("24"), num("36"), num("60")]), num("12"));
  }

  #[test]
  #[should_panic]
  #[cfg(debug_assertions)]
  fn non_integer_operand() {
    gcd(&num("1.5"), &num("3"));
  }
}

mod lcm {
  use super::*;

  #[test]
  fn small_values() {
    assert_eq!(lcm(&num("4"), &num("6")), num("12"));
    assert_eq!(lcm(&num("7"), &num("1")), num("7"));
    assert_eq!(lcm(&num("0"), &num("9")), num("0"));
  }

  #[test]
  fn both_zero_is_undefined() {
    assert!(lcm(&num("0"), &num("0")).is_nan());
  }

  #[test]
  fn list() {
    assert_eq!(lcm_all(&[]), num("1"));
    assert_eq!(lcm_all(&[num("2"), num("3"), num("4")]), num("12"));
  }
}

#[test]
fn gcd_lcm_identity_on_random_pairs() {
  let mut rng = ChaCha8Rng::seed_from_u64(0x6cd);
  for _ in 0..500 {
    let a: u64 = rng.gen_range(0..1_000_000_000_000);
    let b: u64 = rng.gen_range(1..1_000_000);
    let (a, b) = (BigNum::from(a), BigNum::from(b));
    let g = gcd(&a, &b);
    assert!(!g.is_negative());
    assert!((&a % &g).is_zero());
    assert!((&b % &g).is_zero());
    assert_eq!(&lcm(&a, &b) * &g, &a * &b);
  }
}
