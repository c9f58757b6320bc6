//! Numeric context: working precision, named constants and the lazy keyed
//! cache shared by every kernel call.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use astro_float::{Consts, RoundingMode};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::KernelError;
use crate::bignum::{BigNum, nominal_bits};

/// Significant decimal digits carried by a context built with
/// [`NumericContext::new`].
pub const DEFAULT_PRECISION: usize = 100;

type CacheEntry = Arc<dyn Any + Send + Sync>;
type CacheSlot = Arc<OnceCell<CacheEntry>>;

/// Frequently reused values, read-only after the context is built.
#[derive(Debug, Clone)]
pub struct Constants {
  pub zero: BigNum,
  pub one: BigNum,
  pub two: BigNum,
  pub half: BigNum,
  pub negative_one: BigNum,
  pub nan: BigNum,
}

impl Constants {
  fn new() -> Self {
    Constants {
      zero: BigNum::zero(),
      one: BigNum::one(),
      two: BigNum::from(2),
      half: BigNum::new(5, -1),
      negative_one: BigNum::from(-1),
      nan: BigNum::nan(),
    }
  }
}

/// Owns everything the kernel shares between calls.
///
/// A context is `Send + Sync`. Each cache key is computed at most once;
/// callers racing on the same key block until the first initializer has
/// finished and then observe the complete value.
pub struct NumericContext {
  precision: usize,
  constants: Constants,
  cache: RwLock<HashMap<String, CacheSlot>>,
  consts: Mutex<Consts>,
}

impl NumericContext {
  pub fn new() -> Result<Self, KernelError> {
    Self::with_precision(DEFAULT_PRECISION)
  }

  pub fn with_precision(precision: usize) -> Result<Self, KernelError> {
    debug_assert!(precision > 0, "precision must be positive");
    let consts =
      Consts::new().map_err(|e| KernelError::Consts(e.to_string()))?;
    Ok(NumericContext {
      precision: precision.max(1),
      constants: Constants::new(),
      cache: RwLock::new(HashMap::new()),
      consts: Mutex::new(consts),
    })
  }

  /// Working precision in significant decimal digits.
  pub fn precision(&self) -> usize {
    self.precision
  }

  pub fn constants(&self) -> &Constants {
    &self.constants
  }

  pub fn bignum(&self, value: impl Into<BigNum>) -> BigNum {
    value.into()
  }

  pub fn parse(&self, literal: &str) -> Result<BigNum, KernelError> {
    literal.parse()
  }

  /// Return the value stored under `key`, running `init` first if the key
  /// has never been requested. Requesting a key with a different type than
  /// it was stored with is an error.
  pub fn cache<T, F>(&self, key: &str, init: F) -> Result<Arc<T>, KernelError>
  where
    T: Any + Send + Sync,
    F: FnOnce() -> T,
  {
    self.try_cache(key, || Ok(init()))
  }

  /// Like [`cache`](Self::cache) with a fallible initializer. A failed
  /// initialization stores nothing, so the next request runs it again.
  pub fn try_cache<T, F>(
    &self,
    key: &str,
    init: F,
  ) -> Result<Arc<T>, KernelError>
  where
    T: Any + Send + Sync,
    F: FnOnce() -> Result<T, KernelError>,
  {
    let slot = self.slot(key);
    let entry = slot
      .get_or_try_init(|| {
        debug!(key, "computing cache entry");
        init().map(|value| Arc::new(value) as CacheEntry)
      })?
      .clone();
    entry.downcast::<T>().map_err(|_| KernelError::CacheTypeMismatch {
      key: key.to_string(),
    })
  }

  fn slot(&self, key: &str) -> CacheSlot {
    if let Some(slot) = self.cache.read().get(key) {
      return slot.clone();
    }
    self.cache.write().entry(key.to_string()).or_default().clone()
  }

  /// π at the working precision.
  pub fn pi(&self) -> Result<Arc<BigNum>, KernelError> {
    self.cache("pi", || {
      let bits = nominal_bits(self.precision);
      let pi = self.with_consts(|cc| cc.pi(bits, RoundingMode::ToEven));
      BigNum::from_bigfloat(&pi).round(self.precision)
    })
  }

  pub(crate) fn with_consts<R>(&self, f: impl FnOnce(&mut Consts) -> R) -> R {
    let mut consts = self.consts.lock();
    f(&mut consts)
  }
}

impl std::fmt::Debug for NumericContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NumericContext")
      .field("precision", &self.precision)
      .field("cached_keys", &self.cache.read().len())
      .finish()
  }
}
