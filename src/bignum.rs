//! Arbitrary-precision decimal values.
//!
//! A [`BigNum`] is `coefficient * 10^exponent` with a `BigInt` coefficient,
//! plus the non-finite states NaN and ±Infinity. Addition, subtraction,
//! multiplication and remainder are exact. Division and the transcendental
//! functions round to the working precision of a [`NumericContext`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use astro_float::{BigFloat, Consts, Radix, RoundingMode};
use num_bigint::{BigInt, BigUint};
use num_traits::{Pow, Signed, ToPrimitive, Zero};

use crate::KernelError;
use crate::context::NumericContext;

/// Decimal digits per word of the decimal.js layout reported by
/// [`BigNum::digit_blocks`].
pub const DIGITS_PER_BLOCK: i64 = 7;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Repr {
  Finite { coeff: BigInt, exp: i64 },
  Infinite { negative: bool },
  NaN,
}

/// Immutable arbitrary-precision decimal value.
///
/// Finite values are kept normalised (no trailing zeros in the coefficient,
/// zero has exponent 0), so structural equality is numeric equality. NaN is
/// equal to itself so it can act as a sentinel (and a map key), but it is
/// unordered against every other value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigNum(Repr);

fn pow10(n: u64) -> BigInt {
  Pow::pow(BigInt::from(10u32), n)
}

fn digit_count(n: &BigInt) -> u64 {
  if let Some(small) = n.magnitude().to_u64() {
    return u64::from(small.checked_ilog10().unwrap_or(0)) + 1;
  }
  // 2^(bits-1) <= |n| < 2^bits, so the count is `estimate` or one more.
  let bits = n.bits();
  let estimate = ((bits - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
  if n.magnitude() >= pow10(estimate).magnitude() {
    estimate + 1
  } else {
    estimate
  }
}

/// Split off the decimal trailing zeros of `n`.
fn strip_trailing_zeros(n: BigInt) -> (BigInt, u64) {
  // Odd values never end in 0.
  if n.is_zero() || n.trailing_zeros() == Some(0) {
    return (n, 0);
  }
  let (sign, mut magnitude) = n.into_parts();
  let mut zeros = 0;
  let chunk = BigUint::from(10_000_000_000_000_000u64);
  while (&magnitude % &chunk).is_zero() {
    magnitude /= &chunk;
    zeros += 16;
  }
  let ten = BigUint::from(10u32);
  while (&magnitude % &ten).is_zero() {
    magnitude /= &ten;
    zeros += 1;
  }
  (BigInt::from_biguint(sign, magnitude), zeros)
}

/// Bring two scaled coefficients to the smaller of their exponents.
fn align(
  ca: &BigInt,
  ea: i64,
  cb: &BigInt,
  eb: i64,
) -> (BigInt, BigInt, i64) {
  let exp = ea.min(eb);
  let a = ca * pow10((ea - exp) as u64);
  let b = cb * pow10((eb - exp) as u64);
  (a, b, exp)
}

/// Convert decimal digit precision to the bit-precision handed to
/// `astro-float`: rounded up to a word boundary plus one guard word.
pub fn nominal_bits(precision: usize) -> usize {
  let base_bits =
    (precision as f64 * std::f64::consts::LOG2_10).ceil() as usize;
  let word = astro_float::WORD_BIT_SIZE;
  let bits = base_bits.div_ceil(word) * word + word;
  bits.max(2 * word)
}

impl BigNum {
  /// `coeff * 10^exp`, normalised.
  pub fn new(coeff: impl Into<BigInt>, exp: i64) -> Self {
    let coeff = coeff.into();
    if coeff.is_zero() {
      return BigNum(Repr::Finite { coeff, exp: 0 });
    }
    let (coeff, zeros) = strip_trailing_zeros(coeff);
    BigNum(Repr::Finite {
      coeff,
      exp: exp.saturating_add(zeros as i64),
    })
  }

  pub fn zero() -> Self {
    BigNum::new(0, 0)
  }

  pub fn one() -> Self {
    BigNum::new(1, 0)
  }

  pub fn nan() -> Self {
    BigNum(Repr::NaN)
  }

  pub fn infinity(negative: bool) -> Self {
    BigNum(Repr::Infinite { negative })
  }

  // ─── Predicates ─────────────────────────────────────────────────────

  pub fn is_nan(&self) -> bool {
    matches!(self.0, Repr::NaN)
  }

  pub fn is_finite(&self) -> bool {
    matches!(self.0, Repr::Finite { .. })
  }

  pub fn is_infinite(&self) -> bool {
    matches!(self.0, Repr::Infinite { .. })
  }

  pub fn is_zero(&self) -> bool {
    matches!(&self.0, Repr::Finite { coeff, .. } if coeff.is_zero())
  }

  /// Strictly below zero (including -Infinity).
  pub fn is_negative(&self) -> bool {
    match &self.0 {
      Repr::Finite { coeff, .. } => coeff.is_negative(),
      Repr::Infinite { negative } => *negative,
      Repr::NaN => false,
    }
  }

  /// Strictly above zero (including +Infinity).
  pub fn is_positive(&self) -> bool {
    match &self.0 {
      Repr::Finite { coeff, .. } => coeff.is_positive(),
      Repr::Infinite { negative } => !*negative,
      Repr::NaN => false,
    }
  }

  pub fn is_integer(&self) -> bool {
    matches!(&self.0, Repr::Finite { exp, .. } if *exp >= 0)
  }

  // ─── Introspection ──────────────────────────────────────────────────

  /// Decimal exponent of the leading digit (`1234.5` -> 3, `0.01` -> -2).
  /// `None` for NaN and infinities.
  pub fn exponent(&self) -> Option<i64> {
    match &self.0 {
      Repr::Finite { coeff, .. } if coeff.is_zero() => Some(0),
      Repr::Finite { coeff, exp } => Some(digit_count(coeff) as i64 - 1 + exp),
      _ => None,
    }
  }

  /// Number of significant decimal digits (1 for zero, 0 if not finite).
  pub fn significant_digits(&self) -> u64 {
    match &self.0 {
      Repr::Finite { coeff, .. } => digit_count(coeff),
      _ => 0,
    }
  }

  /// Significant digits split into base-10^7 words the way decimal.js
  /// stores them: word boundaries sit at multiples of seven digits from
  /// the decimal point, so the leading word holds `exponent mod 7 + 1`
  /// digits and the last word is padded with trailing zeros.
  pub fn digit_blocks(&self) -> Vec<u32> {
    let Repr::Finite { coeff, .. } = &self.0 else {
      return Vec::new();
    };
    if coeff.is_zero() {
      return vec![0];
    }
    let digits = coeff.magnitude().to_string();
    let e = self.exponent().unwrap_or(0);
    let lead = (e.rem_euclid(DIGITS_PER_BLOCK) + 1) as usize;
    let width = DIGITS_PER_BLOCK as usize;

    let (head, mut rest) = digits.split_at(lead.min(digits.len()));
    let mut blocks = vec![pack_block(head, lead)];
    while !rest.is_empty() {
      let (chunk, tail) = rest.split_at(width.min(rest.len()));
      blocks.push(pack_block(chunk, width));
      rest = tail;
    }
    blocks
  }

  // ─── Exact arithmetic ───────────────────────────────────────────────

  pub fn abs(&self) -> BigNum {
    match &self.0 {
      Repr::Finite { coeff, exp } => BigNum(Repr::Finite {
        coeff: coeff.abs(),
        exp: *exp,
      }),
      Repr::Infinite { .. } => BigNum::infinity(false),
      Repr::NaN => BigNum::nan(),
    }
  }

  pub fn floor(&self) -> BigNum {
    match &self.0 {
      Repr::Finite { coeff, exp } if *exp < 0 => {
        let scale = pow10(exp.unsigned_abs());
        let mut q = coeff / &scale;
        if coeff.is_negative() && &q * &scale != *coeff {
          q -= 1;
        }
        BigNum::new(q, 0)
      }
      _ => self.clone(),
    }
  }

  /// Quotient truncated toward zero. Exact for integer operands, which is
  /// how the integer kernels divide out factors.
  pub fn trunc_div(&self, rhs: &BigNum) -> BigNum {
    match (&self.0, &rhs.0) {
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => {
        if cb.is_zero() {
          return if ca.is_zero() {
            BigNum::nan()
          } else {
            BigNum::infinity(ca.is_negative())
          };
        }
        let (a, b, _) = align(ca, *ea, cb, *eb);
        BigNum::new(a / b, 0)
      }
      (Repr::Finite { .. }, Repr::Infinite { .. }) => BigNum::zero(),
      (Repr::Infinite { negative }, Repr::Finite { coeff, .. }) => {
        BigNum::infinity(*negative != coeff.is_negative())
      }
      _ => BigNum::nan(),
    }
  }

  /// Exact integer power.
  pub fn powi(&self, n: u32) -> BigNum {
    if n == 0 && !self.is_nan() {
      return BigNum::one();
    }
    match &self.0 {
      Repr::Finite { coeff, exp } => match exp.checked_mul(i64::from(n)) {
        Some(exp) => BigNum::new(coeff.pow(n), exp),
        None => scale_overflow(*exp > 0, coeff.is_negative() && n % 2 == 1),
      },
      Repr::Infinite { negative } => BigNum::infinity(*negative && n % 2 == 1),
      Repr::NaN => BigNum::nan(),
    }
  }

  fn add_ref(&self, rhs: &BigNum) -> BigNum {
    match (&self.0, &rhs.0) {
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => {
        let (a, b, exp) = align(ca, *ea, cb, *eb);
        BigNum::new(a + b, exp)
      }
      (Repr::Infinite { negative: a }, Repr::Infinite { negative: b }) => {
        if a == b {
          self.clone()
        } else {
          BigNum::nan()
        }
      }
      (Repr::Infinite { .. }, Repr::Finite { .. }) => self.clone(),
      (Repr::Finite { .. }, Repr::Infinite { .. }) => rhs.clone(),
      _ => BigNum::nan(),
    }
  }

  fn mul_ref(&self, rhs: &BigNum) -> BigNum {
    match (&self.0, &rhs.0) {
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => match ea.checked_add(*eb) {
        Some(exp) => BigNum::new(ca * cb, exp),
        None => {
          scale_overflow(*ea > 0, ca.is_negative() != cb.is_negative())
        }
      },
      (Repr::NaN, _) | (_, Repr::NaN) => BigNum::nan(),
      _ if self.is_zero() || rhs.is_zero() => BigNum::nan(),
      _ => BigNum::infinity(self.is_negative() != rhs.is_negative()),
    }
  }

  /// Truncated remainder: the result carries the sign of the dividend.
  fn rem_ref(&self, rhs: &BigNum) -> BigNum {
    match (&self.0, &rhs.0) {
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => {
        if cb.is_zero() {
          return BigNum::nan();
        }
        let (a, b, exp) = align(ca, *ea, cb, *eb);
        BigNum::new(a % b, exp)
      }
      (Repr::Finite { .. }, Repr::Infinite { .. }) => self.clone(),
      _ => BigNum::nan(),
    }
  }

  // ─── Rounded arithmetic ─────────────────────────────────────────────

  /// Round to `precision` significant digits, half away from zero.
  pub fn round(&self, precision: usize) -> BigNum {
    let Repr::Finite { coeff, exp } = &self.0 else {
      return self.clone();
    };
    let digits = digit_count(coeff);
    if digits <= precision as u64 {
      return self.clone();
    }
    let drop = digits - precision as u64;
    let divisor = pow10(drop);
    let magnitude = coeff.abs();
    let mut q = &magnitude / &divisor;
    let r = &magnitude % &divisor;
    if r * 2 >= divisor {
      q += 1;
    }
    if coeff.is_negative() {
      q = -q;
    }
    BigNum::new(q, exp + drop as i64)
  }

  pub fn div(&self, rhs: &BigNum, ctx: &NumericContext) -> BigNum {
    self.div_with_precision(rhs, ctx.precision())
  }

  pub(crate) fn div_with_precision(
    &self,
    rhs: &BigNum,
    precision: usize,
  ) -> BigNum {
    match (&self.0, &rhs.0) {
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => {
        if cb.is_zero() {
          return if ca.is_zero() {
            BigNum::nan()
          } else {
            BigNum::infinity(ca.is_negative())
          };
        }
        if ca.is_zero() {
          return BigNum::zero();
        }
        let shift = (precision as i64 + 2 + digit_count(cb) as i64
          - digit_count(ca) as i64)
          .max(0) as u64;
        let scaled = ca * pow10(shift);
        let mut q = &scaled / cb;
        let mut exp = ea - eb - shift as i64;
        if !(&scaled % cb).is_zero() {
          // Sticky digit: an inexact tail must never round as an exact tie.
          let tail = if q.is_negative() { -1 } else { 1 };
          q = q * 10 + tail;
          exp -= 1;
        }
        BigNum::new(q, exp).round(precision)
      }
      (Repr::Infinite { negative }, Repr::Finite { coeff, .. }) => {
        BigNum::infinity(*negative != coeff.is_negative())
      }
      (Repr::Finite { .. }, Repr::Infinite { .. }) => BigNum::zero(),
      _ => BigNum::nan(),
    }
  }

  /// `self^y`. Integer exponents are computed exactly before rounding,
  /// `y = 0.5` is a square root, other exponents go through
  /// `exp(y * ln(self))` with guard digits.
  pub fn pow(&self, y: &BigNum, ctx: &NumericContext) -> BigNum {
    if self.is_nan() || y.is_nan() {
      return BigNum::nan();
    }
    if y.is_integer() {
      if let Some(n) = y.abs().to_u64().and_then(|n| u32::try_from(n).ok()) {
        let p = self.powi(n);
        return if y.is_negative() {
          BigNum::one().div(&p, ctx)
        } else {
          p.round(ctx.precision())
        };
      }
    }
    if self.is_negative() {
      return BigNum::nan();
    }
    if self.is_zero() || self.is_infinite() {
      let grows = self.is_infinite() == y.is_positive();
      return if grows {
        BigNum::infinity(false)
      } else {
        BigNum::zero()
      };
    }
    if *self == BigNum::one() {
      return BigNum::one();
    }
    if *y == BigNum::new(5, -1) {
      return self.sqrt(ctx);
    }
    // astro-float's own `pow` does not terminate on exact results.
    self.eval_unary(ctx, |x, p, rm, cc| {
      let guarded = p + astro_float::WORD_BIT_SIZE;
      let y = y.to_bigfloat(guarded, rm, cc);
      let log = x.ln(guarded, rm, cc);
      y.mul(&log, guarded, rm).exp(p, rm, cc)
    })
  }

  // ─── Transcendental functions ───────────────────────────────────────

  pub fn sqrt(&self, ctx: &NumericContext) -> BigNum {
    if self.is_negative() {
      return BigNum::nan();
    }
    if !self.is_finite() || self.is_zero() {
      return self.clone();
    }
    self.eval_unary(ctx, |x, p, rm, _| x.sqrt(p, rm))
  }

  pub fn exp(&self, ctx: &NumericContext) -> BigNum {
    match &self.0 {
      Repr::NaN => BigNum::nan(),
      Repr::Infinite { negative: true } => BigNum::zero(),
      Repr::Infinite { negative: false } => self.clone(),
      Repr::Finite { .. } if self.is_zero() => BigNum::one(),
      Repr::Finite { .. } => {
        self.eval_unary(ctx, |x, p, rm, cc| x.exp(p, rm, cc))
      }
    }
  }

  /// Natural logarithm.
  pub fn ln(&self, ctx: &NumericContext) -> BigNum {
    if self.is_nan() || self.is_negative() {
      return BigNum::nan();
    }
    if self.is_zero() {
      return BigNum::infinity(true);
    }
    if self.is_infinite() {
      return self.clone();
    }
    if *self == BigNum::one() {
      return BigNum::zero();
    }
    self.eval_unary(ctx, |x, p, rm, cc| x.ln(p, rm, cc))
  }

  pub fn sin(&self, ctx: &NumericContext) -> BigNum {
    if !self.is_finite() {
      return BigNum::nan();
    }
    if self.is_zero() {
      return BigNum::zero();
    }
    self.eval_unary(ctx, |x, p, rm, cc| x.sin(p, rm, cc))
  }

  pub fn acos(&self, ctx: &NumericContext) -> BigNum {
    if !self.is_finite() || self.abs() > BigNum::one() {
      return BigNum::nan();
    }
    self.eval_unary(ctx, |x, p, rm, cc| x.acos(p, rm, cc))
  }

  /// Evaluate `op` with `astro-float` at the context's precision and round
  /// the exact decimal image of the result back to that precision.
  fn eval_unary<F>(&self, ctx: &NumericContext, op: F) -> BigNum
  where
    F: FnOnce(&BigFloat, usize, RoundingMode, &mut Consts) -> BigFloat,
  {
    let precision = ctx.precision();
    let bits = nominal_bits(precision);
    let rm = RoundingMode::ToEven;
    let result = ctx.with_consts(|cc| {
      let x = self.to_bigfloat(bits, rm, cc);
      BigNum::from_bigfloat(&op(&x, bits, rm, cc))
    });
    result.round(precision)
  }

  // ─── astro-float bridge ─────────────────────────────────────────────

  pub fn to_bigfloat(
    &self,
    bits: usize,
    rm: RoundingMode,
    cc: &mut Consts,
  ) -> BigFloat {
    match &self.0 {
      Repr::NaN => astro_float::NAN,
      Repr::Infinite { negative: true } => astro_float::INF_NEG,
      Repr::Infinite { negative: false } => astro_float::INF_POS,
      Repr::Finite { coeff, .. } if coeff.is_zero() => {
        BigFloat::from_i32(0, bits)
      }
      Repr::Finite { coeff, exp } => BigFloat::parse(
        &format!("{}e{}", coeff, exp),
        Radix::Dec,
        bits,
        rm,
        cc,
      ),
    }
  }

  /// Exact decimal image of a `BigFloat`.
  ///
  /// The mantissa words encode `m * 2^(exponent - mantissa_bits)`; a negative
  /// power of two is rewritten as `5^k * 10^-k`, so no digits are lost.
  pub fn from_bigfloat(bf: &BigFloat) -> BigNum {
    if bf.is_nan() {
      return BigNum::nan();
    }
    if bf.is_inf_pos() {
      return BigNum::infinity(false);
    }
    if bf.is_inf_neg() {
      return BigNum::infinity(true);
    }
    let Some((words, sig_bits, sign, exponent, _inexact)) = bf.as_raw_parts()
    else {
      return BigNum::nan();
    };
    if sig_bits == 0 || words.iter().all(|&w| w == 0) {
      return BigNum::zero();
    }

    let mantissa = BigUint::from_bytes_le(
      &words
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect::<Vec<u8>>(),
    );
    let mantissa_bits = words.len() * astro_float::WORD_BIT_SIZE;
    let shift = exponent as i64 - mantissa_bits as i64;

    let (magnitude, exp) = if shift >= 0 {
      (mantissa << (shift as u64), 0)
    } else {
      let k = shift.unsigned_abs() as u32;
      (mantissa * BigUint::from(5u32).pow(k), shift)
    };
    let coeff = BigInt::from(magnitude);
    let coeff = if sign.is_negative() { -coeff } else { coeff };
    BigNum::new(coeff, exp)
  }

  // ─── Native conversions ─────────────────────────────────────────────

  pub fn to_f64(&self) -> f64 {
    match &self.0 {
      Repr::NaN => f64::NAN,
      Repr::Infinite { negative: true } => f64::NEG_INFINITY,
      Repr::Infinite { negative: false } => f64::INFINITY,
      Repr::Finite { coeff, exp } => format!("{}e{}", coeff, exp)
        .parse::<f64>()
        .unwrap_or(f64::NAN),
    }
  }

  /// The value as a `u64` when it is a non-negative integer that fits.
  pub fn to_u64(&self) -> Option<u64> {
    match &self.0 {
      Repr::Finite { coeff, exp } if (0..=20).contains(exp) => {
        (coeff * pow10(*exp as u64)).to_u64()
      }
      _ => None,
    }
  }

  pub fn to_bigint(&self) -> Option<BigInt> {
    match &self.0 {
      Repr::Finite { coeff, exp } if *exp >= 0 => {
        Some(coeff * pow10(*exp as u64))
      }
      _ => None,
    }
  }
}

fn pack_block(chunk: &str, width: usize) -> u32 {
  let value = chunk
    .bytes()
    .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
  (chunk.len()..width).fold(value, |acc, _| acc * 10)
}

/// Result of an exponent that left the `i64` range: too large to be finite,
/// or too small to differ from zero.
fn scale_overflow(upward: bool, negative: bool) -> BigNum {
  if upward {
    BigNum::infinity(negative)
  } else {
    BigNum::zero()
  }
}

impl PartialOrd for BigNum {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    match (&self.0, &other.0) {
      (Repr::NaN, Repr::NaN) => Some(Ordering::Equal),
      (Repr::NaN, _) | (_, Repr::NaN) => None,
      (Repr::Infinite { negative: a }, Repr::Infinite { negative: b }) => {
        Some(b.cmp(a))
      }
      (Repr::Infinite { negative }, _) => Some(if *negative {
        Ordering::Less
      } else {
        Ordering::Greater
      }),
      (_, Repr::Infinite { negative }) => Some(if *negative {
        Ordering::Greater
      } else {
        Ordering::Less
      }),
      (
        Repr::Finite { coeff: ca, exp: ea },
        Repr::Finite { coeff: cb, exp: eb },
      ) => {
        let by_sign = ca.sign().cmp(&cb.sign());
        if by_sign != Ordering::Equal || ca.is_zero() {
          return Some(by_sign);
        }
        // Same sign, both non-zero: the leading-digit exponent decides
        // unless it is equal.
        let (xa, xb) = (self.exponent(), other.exponent());
        if xa != xb {
          let by_magnitude = xa.cmp(&xb);
          return Some(if ca.is_negative() {
            by_magnitude.reverse()
          } else {
            by_magnitude
          });
        }
        let (a, b, _) = align(ca, *ea, cb, *eb);
        Some(a.cmp(&b))
      }
    }
  }
}

impl fmt::Display for BigNum {
  /// Plain notation while the leading-digit exponent is in `-7..21`,
  /// scientific (`1.5e+300`) outside it.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (coeff, exp) = match &self.0 {
      Repr::NaN => return write!(f, "NaN"),
      Repr::Infinite { negative: true } => return write!(f, "-Infinity"),
      Repr::Infinite { negative: false } => return write!(f, "Infinity"),
      Repr::Finite { coeff, exp } => (coeff, *exp),
    };
    let sign = if coeff.is_negative() { "-" } else { "" };
    let digits = coeff.magnitude().to_string();
    let e = self.exponent().unwrap_or(0);

    if e > -7 && e < 21 {
      if exp >= 0 {
        write!(f, "{}{}{}", sign, digits, "0".repeat(exp as usize))
      } else if e >= 0 {
        let (int_part, frac_part) = digits.split_at(e as usize + 1);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
      } else {
        let zeros = "0".repeat((-e - 1) as usize);
        write!(f, "{}0.{}{}", sign, zeros, digits)
      }
    } else {
      let (lead, rest) = digits.split_at(1);
      let exp_sign = if e >= 0 { "+" } else { "" };
      if rest.is_empty() {
        write!(f, "{}{}e{}{}", sign, lead, exp_sign, e)
      } else {
        write!(f, "{}{}.{}e{}{}", sign, lead, rest, exp_sign, e)
      }
    }
  }
}

impl FromStr for BigNum {
  type Err = KernelError;

  /// Decimal literals (`-12.5`, `3e-7`, `.5`) plus `NaN` and `±Infinity`.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let err = || KernelError::Parse(s.to_string());
    match s {
      "NaN" => return Ok(BigNum::nan()),
      "Infinity" | "+Infinity" => return Ok(BigNum::infinity(false)),
      "-Infinity" => return Ok(BigNum::infinity(true)),
      _ => {}
    }

    let (negative, body) = match s.as_bytes().first() {
      Some(b'-') => (true, &s[1..]),
      Some(b'+') => (false, &s[1..]),
      _ => (false, s),
    };
    let (mantissa, exp) = match body.find(['e', 'E']) {
      Some(pos) => {
        let exp = body[pos + 1..].parse::<i64>().map_err(|_| err())?;
        (&body[..pos], exp)
      }
      None => (body, 0),
    };
    let (int_part, frac_part) =
      mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = int_part
      .bytes()
      .chain(frac_part.bytes())
      .all(|b| b.is_ascii_digit());
    if !all_digits || int_part.len() + frac_part.len() == 0 {
      return Err(err());
    }

    let digits = format!("{}{}", int_part, frac_part);
    let coeff = digits.parse::<BigInt>().map_err(|_| err())?;
    let coeff = if negative { -coeff } else { coeff };
    Ok(BigNum::new(coeff, exp - frac_part.len() as i64))
  }
}

impl TryFrom<&BigNum> for u64 {
  type Error = KernelError;

  fn try_from(value: &BigNum) -> Result<Self, Self::Error> {
    value
      .to_u64()
      .ok_or_else(|| KernelError::NotRepresentable(value.to_string()))
  }
}

macro_rules! impl_from_int {
  ($($t:ty),*) => {
    $(
      impl From<$t> for BigNum {
        fn from(n: $t) -> Self {
          BigNum::new(BigInt::from(n), 0)
        }
      }
    )*
  };
}

impl_from_int!(i32, i64, u32, u64, u128, usize);

impl From<BigInt> for BigNum {
  fn from(n: BigInt) -> Self {
    BigNum::new(n, 0)
  }
}

macro_rules! forward_binop {
  ($trait:ident, $method:ident, $imp:ident) => {
    impl $trait<&BigNum> for &BigNum {
      type Output = BigNum;
      fn $method(self, rhs: &BigNum) -> BigNum {
        self.$imp(rhs)
      }
    }

    impl $trait<BigNum> for BigNum {
      type Output = BigNum;
      fn $method(self, rhs: BigNum) -> BigNum {
        (&self).$imp(&rhs)
      }
    }

    impl $trait<&BigNum> for BigNum {
      type Output = BigNum;
      fn $method(self, rhs: &BigNum) -> BigNum {
        (&self).$imp(rhs)
      }
    }
  };
}

forward_binop!(Add, add, add_ref);
forward_binop!(Mul, mul, mul_ref);
forward_binop!(Rem, rem, rem_ref);

impl Sub<&BigNum> for &BigNum {
  type Output = BigNum;
  fn sub(self, rhs: &BigNum) -> BigNum {
    self.add_ref(&-rhs)
  }
}

impl Sub<BigNum> for BigNum {
  type Output = BigNum;
  fn sub(self, rhs: BigNum) -> BigNum {
    &self - &rhs
  }
}

impl Sub<&BigNum> for BigNum {
  type Output = BigNum;
  fn sub(self, rhs: &BigNum) -> BigNum {
    &self - rhs
  }
}

impl Neg for &BigNum {
  type Output = BigNum;
  fn neg(self) -> BigNum {
    match &self.0 {
      Repr::Finite { coeff, exp } => BigNum(Repr::Finite {
        coeff: -coeff,
        exp: *exp,
      }),
      Repr::Infinite { negative } => BigNum::infinity(!*negative),
      Repr::NaN => BigNum::nan(),
    }
  }
}

impl Neg for BigNum {
  type Output = BigNum;
  fn neg(self) -> BigNum {
    -&self
  }
}
