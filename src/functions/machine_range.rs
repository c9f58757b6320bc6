use crate::bignum::BigNum;

/// Whether `d` survives conversion to an IEEE double.
///
/// NaN and the infinities always do. Finite values must fit in three
/// decimal.js digit words with a leading word below 90 (about 16
/// significant digits) and have a decimal exponent strictly between -306
/// and 308.
pub fn is_in_machine_range(d: &BigNum) -> bool {
  if !d.is_finite() {
    return true;
  }

  // Maximum safe integer 9007199254740991 is stored as [90, 719925, 4740991].
  let blocks = d.digit_blocks();
  if blocks.len() > 3 || (blocks.len() == 3 && blocks[0] >= 90) {
    return false;
  }
  debug_assert!(d.significant_digits() <= 16);

  // binary64: emax = 307, emin = -306
  matches!(d.exponent(), Some(e) if e < 308 && e > -306)
}

/// The native value of `d` when it has fewer than 15 significant digits and
/// its exponent is inside the double range. NaN and infinities map to their
/// native counterparts.
pub fn to_machine_number(d: &BigNum) -> Option<f64> {
  if !d.is_finite() {
    return Some(d.to_f64());
  }
  match d.exponent() {
    Some(e) if d.significant_digits() < 15 && e < 308 && e > -306 => {
      Some(d.to_f64())
    }
    _ => None,
  }
}
