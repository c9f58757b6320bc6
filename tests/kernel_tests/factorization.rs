use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn product(factors: &PrimeFactors) -> BigNum {
  factors
    .iter()
    .fold(BigNum::one(), |acc, (prime, k)| acc * prime.powi(*k))
}

fn assert_all_prime(factors: &PrimeFactors) {
  for prime in factors.keys() {
    let native = prime.to_u64().expect("prime factor fits u64");
    assert!(num_prime::nt_funcs::is_prime64(native), "{} is not prime", prime);
  }
}

fn sorted(factors: &PrimeFactors) -> Vec<(String, u32)> {
  let mut entries: Vec<(BigNum, u32)> =
    factors.iter().map(|(p, k)| (p.clone(), *k)).collect();
  entries.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
  entries.into_iter().map(|(p, k)| (p.to_string(), k)).collect()
}

mod prime_factors {
  use super::*;

  #[test]
  fn one_has_no_factors() {
    assert!(prime_factors(&num("1")).is_empty());
  }

  #[test]
  fn prime() {
    assert_eq!(sorted(&prime_factors(&num("97"))), vec![("97".into(), 1)]);
  }

  #[test]
  fn composite() {
    assert_eq!(
      sorted(&prime_factors(&num("360"))),
      vec![("2".into(), 3), ("3".into(), 2), ("5".into(), 1)]
    );
  }

  #[test]
  fn snapshot() {
    let factors = sorted(&prime_factors(&num("9699690")));
    insta::assert_snapshot!(format!("{:?}", factors), @r#"[("2", 1), ("3", 1), ("5", 1), ("7", 1), ("11", 1), ("13", 1), ("17", 1), ("19", 1)]"#);
  }

  #[test]
  fn wheel_path_small_primes() {
    // 2^60 * 3^3 * 5^2 * 7 * 11^2 * 13
    let n = num("2").powi(60)
      * num("27")
      * num("25")
      * num("7")
      * num("121")
      * num("13");
    let factors = prime_factors(&n);
    assert_eq!(
      sorted(&factors),
      vec![
        ("2".into(), 60),
        ("3".into(), 3),
        ("5".into(), 2),
        ("7".into(), 1),
        ("11".into(), 2),
        ("13".into(), 1),
      ]
    );
    assert_eq!(product(&factors), n);
  }

  #[test]
  fn wheel_path_prime_square_cofactor() {
    let n = num("2").powi(60) * num("49");
    assert_eq!(
      sorted(&prime_factors(&n)),
      vec![("2".into(), 60), ("7".into(), 2)]
    );

    let n = num("2").powi(60) * num("343");
    assert_eq!(
      sorted(&prime_factors(&n)),
      vec![("2".into(), 60), ("7".into(), 3)]
    );
  }

  #[test]
  fn wheel_path_large_prime_cofactor() {
    let n = num("3").powi(40) * num("1000003");
    let factors = prime_factors(&n);
    assert_eq!(
      sorted(&factors),
      vec![("3".into(), 40), ("1000003".into(), 1)]
    );
  }

  #[test]
  fn wheel_path_prime_cofactor_above_native_range() {
    // 2^53 + 5 is prime and above the native factorizer's threshold.
    let p = num("9007199254740997");
    let n = &p * &num("3");
    let factors = prime_factors(&n);
    assert_eq!(
      sorted(&factors),
      vec![("3".into(), 1), ("9007199254740997".into(), 1)]
    );
    assert_all_prime(&factors);
    assert_eq!(prime_factors(&p), PrimeFactors::from([(p.clone(), 1)]));
  }

  #[test]
  fn wheel_path_matches_definition() {
    let n = num("5").powi(23) * num("1009") * num("1013") * num("1013");
    let factors = prime_factors(&n);
    assert_eq!(product(&factors), n);
    assert_all_prime(&factors);
    assert_eq!(factors.get(&num("1013")), Some(&2));
  }

  #[test]
  fn random_values_recompose() {
    let mut rng = ChaCha8Rng::seed_from_u64(360);
    for _ in 0..300 {
      let n = BigNum::from(rng.gen_range(1u64..100_000_000));
      let factors = prime_factors(&n);
      assert_eq!(product(&factors), n);
      assert_all_prime(&factors);
    }
  }
}

mod factor_power {
  use super::*;

  #[test]
  fn square_root_of_75() {
    assert_eq!(factor_power(&num("75"), 2), (num("5"), num("3")));
  }

  #[test]
  fn cube_root_of_72() {
    assert_eq!(factor_power(&num("72"), 3), (num("2"), num("9")));
  }

  #[test]
  fn perfect_power() {
    assert_eq!(factor_power(&num("1024"), 5), (num("4"), num("1")));
  }

  #[test]
  fn one() {
    assert_eq!(factor_power(&num("1"), 4), (num("1"), num("1")));
  }

  #[test]
  fn exponent_one_extracts_everything() {
    assert_eq!(factor_power(&num("360"), 1), (num("360"), num("1")));
  }

  #[test]
  fn random_values_satisfy_identity() {
    let mut rng = ChaCha8Rng::seed_from_u64(75);
    for _ in 0..200 {
      let n = BigNum::from(rng.gen_range(1u64..10_000_000));
      let exponent = rng.gen_range(1u32..6);
      let (factor, root) = factor_power(&n, exponent);
      assert_eq!(&factor.powi(exponent) * &root, n);
      for multiplicity in prime_factors(&root).values() {
        assert!(*multiplicity < exponent);
      }
    }
  }
}
