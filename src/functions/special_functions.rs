use std::sync::Arc;

use tracing::trace;

use crate::KernelError;
use crate::bignum::BigNum;
use crate::context::NumericContext;

const LANCZOS_G: u32 = 7;

// Lanczos coefficients for g = 7, n = 9 (GSL specfunc/gamma.c).
const LANCZOS_7_C: [&str; 9] = [
  "0.99999999999980993227684700473478",
  "676.520368121885098567009190444019",
  "-1259.13921672240287047156078755283",
  "771.3234287776530788486528258894",
  "-176.61502916214059906584551354",
  "12.507343278686904814458936853",
  "-0.13857109526572011689554707",
  "9.984369578019570859563e-6",
  "1.50563273514931155834e-7",
];

// Coefficients for g = 607/128, n = 15. Accurate to about 15 digits
// whatever the working precision.
const GAMMA_P_LN: [&str; 15] = [
  "0.99999999999999709182",
  "57.156235665862923517",
  "-59.597960355475491248",
  "14.136097974741747174",
  "-0.49191381609762019978",
  "0.33994649984811888699e-4",
  "0.46523628927048575665e-4",
  "-0.98374475304879564677e-4",
  "0.15808870322491248884e-3",
  "-0.21026444172410488319e-3",
  "0.2174396181152126432e-3",
  "-0.16431810653676389022e-3",
  "0.84418223983852743293e-4",
  "-0.2619083840158140867e-4",
  "0.36899182659531622704e-5",
];

pub(crate) const LANCZOS_KEY: &str = "lanczos-7-c";
pub(crate) const GAMMA_P_LN_KEY: &str = "gamma-p-ln";
const GAMMA_G_LN_KEY: &str = "gamma-g-ln";

fn coefficient_table(
  ctx: &NumericContext,
  key: &str,
  literals: &[&str],
) -> Result<Arc<Vec<BigNum>>, KernelError> {
  ctx.try_cache(key, || {
    literals.iter().map(|literal| ctx.parse(literal)).collect()
  })
}

/// ln Γ(z) for `z >= 0`; NaN for negative `z`.
pub fn lngamma(
  ctx: &NumericContext,
  z: &BigNum,
) -> Result<BigNum, KernelError> {
  let c = ctx.constants();
  if z.is_nan() || z.is_negative() {
    return Ok(c.nan.clone());
  }
  if z.is_infinite() {
    return Ok(z.clone());
  }
  if z.is_zero() {
    return Ok(BigNum::infinity(false));
  }

  let p = coefficient_table(ctx, GAMMA_P_LN_KEY, &GAMMA_P_LN)?;
  let mut x = p[0].clone();
  for (i, coefficient) in p.iter().enumerate().skip(1).rev() {
    x = &x + &coefficient.div(&(z + &BigNum::from(i)), ctx);
  }

  let g = ctx.cache(GAMMA_G_LN_KEY, || {
    BigNum::from(607).div(&BigNum::from(128), ctx)
  })?;
  let t = &(z + &*g) + &c.half;
  let two_pi = &*ctx.pi()? * &c.two;

  // The sum yields ln Γ(z + 1); ln z takes it back to ln Γ(z).
  let result = &c.half * &two_pi.ln(ctx) + &t.ln(ctx) * &(z + &c.half) - &t
    + x.ln(ctx)
    - z.ln(ctx);
  Ok(result.round(ctx.precision()))
}

/// Γ(z). NaN at the poles (zero and negative integers).
pub fn gamma(
  ctx: &NumericContext,
  z: &BigNum,
) -> Result<BigNum, KernelError> {
  let c = ctx.constants();
  if z.is_nan() {
    return Ok(c.nan.clone());
  }
  if z.is_infinite() {
    return Ok(if z.is_negative() { c.nan.clone() } else { z.clone() });
  }
  if z.is_integer() && !z.is_positive() {
    trace!(%z, "gamma pole");
    return Ok(c.nan.clone());
  }

  if z < &c.half {
    trace!(%z, "gamma by reflection");
    let pi = ctx.pi()?;
    let reflected = gamma(ctx, &(&c.one - z))?;
    let denominator = (&*pi * z).sin(ctx) * reflected;
    return Ok(pi.div(&denominator, ctx));
  }

  if z > &BigNum::from(100) {
    trace!(%z, "gamma through lngamma");
    return Ok(lngamma(ctx, z)?.exp(ctx));
  }

  trace!(%z, "gamma by Lanczos series");
  let z = z - &c.one;
  let coefficients = coefficient_table(ctx, LANCZOS_KEY, &LANCZOS_7_C)?;
  let mut x = coefficients[0].clone();
  for (i, coefficient) in coefficients.iter().enumerate().skip(1) {
    x = &x + &coefficient.div(&(&z + &BigNum::from(i)), ctx);
  }

  let t = &(&z + &BigNum::from(LANCZOS_G)) + &c.half;
  let sqrt_two_pi = (&*ctx.pi()? * &c.two).sqrt(ctx);
  let power = t.pow(&(&z + &c.half), ctx);
  let result = sqrt_two_pi * (x * (-&t).exp(ctx) * power);
  Ok(result.round(ctx.precision()))
}
