use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};
use tracing::trace;

use crate::bignum::BigNum;
use crate::context::NumericContext;

/// Prime -> multiplicity. The product of `prime^multiplicity` over all
/// entries is the factored number.
pub type PrimeFactors = HashMap<BigNum, u32>;

/// Largest integer a double represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

// Gaps between consecutive wheel candidates coprime to 30, starting at 7.
const PRIME_WHEEL_INC: [u32; 8] = [4, 2, 4, 2, 4, 6, 2, 6];

const SMALL_FACTORIALS: [u32; 10] =
  [1, 1, 2, 6, 24, 120, 720, 5040, 40320, 362880];

/// Greatest common divisor of two integers (Euclid). Never negative.
pub fn gcd(a: &BigNum, b: &BigNum) -> BigNum {
  debug_assert!(
    a.is_integer() && b.is_integer(),
    "gcd expects integer operands, got {} and {}",
    a,
    b
  );
  let (mut a, mut b) = (a.clone(), b.clone());
  while !b.is_zero() {
    let r = &a % &b;
    a = b;
    b = r;
  }
  a.abs()
}

/// Least common multiple, `a * b / gcd(a, b)`. NaN when both are zero.
pub fn lcm(a: &BigNum, b: &BigNum) -> BigNum {
  (a * b).trunc_div(&gcd(a, b))
}

/// GCD of a list of integers; 0 for an empty list.
pub fn gcd_all(values: &[BigNum]) -> BigNum {
  values
    .iter()
    .fold(BigNum::zero(), |acc, value| gcd(&acc, value))
}

/// LCM of a list of integers; 1 for an empty list.
pub fn lcm_all(values: &[BigNum]) -> BigNum {
  values
    .iter()
    .fold(BigNum::one(), |acc, value| lcm(&acc, value))
}

/// Decompose a positive integer into prime powers.
///
/// Values below [`MAX_SAFE_INTEGER`] go through the native factorizer,
/// larger ones through wheel factorization on decimal values.
pub fn prime_factors(n: &BigNum) -> PrimeFactors {
  debug_assert!(
    n.is_integer() && n.is_positive(),
    "prime_factors expects a positive integer, got {}",
    n
  );
  match n.to_u64() {
    Some(native) if native < MAX_SAFE_INTEGER => {
      trace!(n = native, "native prime factorization");
      machine_prime_factors(native)
    }
    _ => {
      trace!(%n, "wheel factorization");
      wheel_prime_factors(n)
    }
  }
}

fn machine_prime_factors(n: u64) -> PrimeFactors {
  if n <= 1 {
    return PrimeFactors::new();
  }
  num_prime::nt_funcs::factorize64(n)
    .into_iter()
    .map(|(prime, multiplicity)| (BigNum::from(prime), multiplicity as u32))
    .collect()
}

fn wheel_prime_factors(n: &BigNum) -> PrimeFactors {
  let Some(n) = n.to_bigint() else {
    return PrimeFactors::new();
  };
  // Native arithmetic while the value fits; k * k stays below 2^128.
  match n.to_u64() {
    Some(native) => wheel(u128::from(native))
      .into_iter()
      .map(|(prime, multiplicity)| (BigNum::from(prime), multiplicity))
      .collect(),
    None => wheel(n)
      .into_iter()
      .map(|(prime, multiplicity)| (BigNum::from(prime), multiplicity))
      .collect(),
  }
}

/// Trial division by 2, 3, 5 and then by the candidates coprime to 30.
/// Factors come out in ascending order.
fn wheel<T>(mut n: T) -> Vec<(T, u32)>
where
  T: Num + Ord + Clone + From<u32>,
{
  let mut factors: Vec<(T, u32)> = Vec::new();

  for p in [2u32, 3, 5] {
    let p = T::from(p);
    while (n.clone() % p.clone()).is_zero() {
      push_factor(&mut factors, &p);
      n = n / p.clone();
    }
  }

  let mut k = T::from(7);
  let mut i = 0;
  // k <= sqrt(n); the remaining cofactor may be the square of a prime.
  while k.clone() * k.clone() <= n {
    if (n.clone() % k.clone()).is_zero() {
      push_factor(&mut factors, &k);
      n = n / k.clone();
    } else {
      k = k + T::from(PRIME_WHEEL_INC[i]);
      i = (i + 1) % PRIME_WHEEL_INC.len();
    }
  }

  if !n.is_one() {
    push_factor(&mut factors, &n);
  }
  factors
}

fn push_factor<T: PartialEq + Clone>(factors: &mut Vec<(T, u32)>, p: &T) {
  match factors.last_mut() {
    Some((last, count)) if *last == *p => *count += 1,
    _ => factors.push((p.clone(), 1)),
  }
}

/// Return `(factor, root)` such that
/// `n^(1/exponent) = factor * root^(1/exponent)`
/// and `root` has no `exponent`-th power factor.
///
/// `factor_power(75, 2) -> (5, 3)` since `75 = 5^2 * 3`.
pub fn factor_power(n: &BigNum, exponent: u32) -> (BigNum, BigNum) {
  debug_assert!(
    n.is_integer() && n.is_positive(),
    "factor_power expects a positive integer, got {}",
    n
  );
  debug_assert!(exponent > 0, "factor_power expects a positive exponent");

  let mut factor = BigNum::one();
  let mut root = BigNum::one();
  for (prime, multiplicity) in prime_factors(n) {
    factor = factor * prime.powi(multiplicity / exponent);
    root = root * prime.powi(multiplicity % exponent);
  }
  (factor, root)
}

/// `n!` for a non-negative integer `n`, NaN otherwise.
pub fn factorial(ctx: &NumericContext, n: &BigNum) -> BigNum {
  let constants = ctx.constants();
  if !n.is_integer() || n.is_negative() {
    return constants.nan.clone();
  }

  let native = match u64::try_from(n) {
    Ok(small) if small < SMALL_FACTORIALS.len() as u64 => {
      trace!(n = small, "factorial from table");
      return BigNum::from(SMALL_FACTORIALS[small as usize]);
    }
    Ok(native) if native <= MAX_SAFE_INTEGER => native,
    _ => {
      trace!(%n, "factorial by direct product");
      let Some(limit) = n.to_bigint() else {
        return constants.nan.clone();
      };
      let mut value = BigInt::from(1u32);
      let mut i = BigInt::from(2u32);
      while i <= limit {
        value *= &i;
        i += 1u32;
      }
      return BigNum::from(value);
    }
  };

  if native % 2 == 1 {
    trace!(n = native, "odd factorial");
    return n * &factorial(ctx, &(n - &constants.one));
  }

  // n! for even n is the product of n, n + (n-2), n + (n-2) + (n-4), ...
  trace!(n = native, "even factorial by partial sums");
  let mut remaining = native;
  let mut sum = u128::from(native);
  let mut value = BigInt::from(native);
  while remaining > 2 {
    remaining -= 2;
    sum += u128::from(remaining);
    value *= sum;
  }
  BigNum::from(value)
}
