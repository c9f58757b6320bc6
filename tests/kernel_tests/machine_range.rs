use super::*;

mod is_in_machine_range {
  use super::*;

  #[test]
  fn in_range() {
    assert!(is_in_machine_range(&num("0")));
    assert!(is_in_machine_range(&num("1")));
    assert!(is_in_machine_range(&num("-2.5")));
    assert!(is_in_machine_range(&num("1e300")));
    assert!(is_in_machine_range(&num("1e307")));
    assert!(is_in_machine_range(&num("1e-305")));
    assert!(is_in_machine_range(&num("8999999999999999")));
  }

  #[test]
  fn non_finite_values() {
    assert!(is_in_machine_range(&BigNum::infinity(false)));
    assert!(is_in_machine_range(&BigNum::infinity(true)));
    assert!(is_in_machine_range(&BigNum::nan()));
  }

  #[test]
  fn too_many_digits() {
    assert!(!is_in_machine_range(&num("12345678901234567")));
    assert!(!is_in_machine_range(&num("9007199254740991")));
    assert!(!is_in_machine_range(&num("0.12345678901234567")));
  }

  #[test]
  fn exponent_out_of_range() {
    assert!(!is_in_machine_range(&num("1e308")));
    assert!(!is_in_machine_range(&num("-1e400")));
    assert!(!is_in_machine_range(&num("1e-306")));
  }

  #[test]
  fn follows_digit_count_of_rounded_values() {
    let ctx = ctx_with_precision(10);
    let third = num("1").div(&num("3"), &ctx);
    assert!(is_in_machine_range(&third));
    let ctx = ctx_with_precision(40);
    let third = num("1").div(&num("3"), &ctx);
    assert!(!is_in_machine_range(&third));
  }

  fn ctx_with_precision(precision: usize) -> NumericContext {
    NumericContext::with_precision(precision).unwrap()
  }
}

mod to_machine_number {
  use super::*;

  #[test]
  fn short_values_convert() {
    assert_eq!(to_machine_number(&num("0.1")), Some(0.1));
    assert_eq!(to_machine_number(&num("-42")), Some(-42.0));
    assert_eq!(to_machine_number(&num("1e300")), Some(1e300));
  }

  #[test]
  fn long_or_out_of_range_values_do_not() {
    assert_eq!(to_machine_number(&num("123456789012345")), None);
    assert_eq!(to_machine_number(&num("1e308")), None);
  }

  #[test]
  fn non_finite_values() {
    assert_eq!(
      to_machine_number(&BigNum::infinity(true)),
      Some(f64::NEG_INFINITY)
    );
    assert!(to_machine_number(&BigNum::nan()).unwrap().is_nan());
  }
}
