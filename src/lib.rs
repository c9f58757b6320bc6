//! Numeric kernel for a symbolic-computation engine.
//!
//! Exact and approximate routines over arbitrary-precision decimal values:
//! GCD/LCM, prime factorization, power factorization, factorial, gamma and
//! log-gamma, and a classifier deciding whether a value fits a native
//! double. Every routine is a pure, synchronous computation; the only shared
//! state is the lazy cache owned by a [`NumericContext`].
//!
//! ```no_run
//! use bignum_kernel::{NumericContext, factor_power, gamma};
//!
//! let ctx = NumericContext::new()?;
//! let (factor, root) = factor_power(&ctx.bignum(75), 2);
//! assert_eq!((factor, root), (ctx.bignum(5), ctx.bignum(3)));
//! let g = gamma(&ctx, &ctx.bignum(6))?;
//! assert!((g.to_f64() - 120.0).abs() < 1e-9);
//! # Ok::<(), bignum_kernel::KernelError>(())
//! ```

use thiserror::Error;

pub mod bignum;
pub mod context;
pub mod functions;

pub use bignum::BigNum;
pub use context::{Constants, DEFAULT_PRECISION, NumericContext};
pub use functions::*;

#[derive(Error, Debug)]
pub enum KernelError {
  #[error("Parse error: {0}")]
  Parse(String),
  #[error("Constant cache error: {0}")]
  Consts(String),
  #[error("Cache entry {key:?} holds a value of a different type")]
  CacheTypeMismatch { key: String },
  #[error("Not representable as a native number: {0}")]
  NotRepresentable(String),
}
