//! Interchangeable BLAKE2b backends.
//!
//! A backend exposes the classic `init` / `init_key` / `update` / `final`
//! quartet over an opaque state. Any implementation must produce the same
//! digests as [`CoreBackend`] for every valid input, so callers can swap one
//! for another (a native library, a different SIMD crate) without changing
//! results.

use crate::{
  Blake2bError, Blake2bHasher,
  config::{Blake2bConfig, Blake2bForce},
  output::Blake2bDigest,
};

/// Streaming BLAKE2b contract over an opaque state.
pub trait Blake2bBackend {
  /// Per-computation hashing state.
  type State;

  /// Short identifier for logs and test output.
  fn name(&self) -> &'static str;

  /// Start an unkeyed computation producing `out_len` bytes.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::InvalidOutputLength`] unless `1 <= out_len <= 64`.
  fn init(&self, out_len: usize) -> Result<Self::State, Blake2bError>;

  /// Start a keyed computation producing `out_len` bytes.
  ///
  /// # Errors
  ///
  /// As [`init`](Self::init), plus [`Blake2bError::InvalidKeyLength`] for keys
  /// longer than 64 bytes.
  fn init_key(&self, out_len: usize, key: &[u8]) -> Result<Self::State, Blake2bError>;

  fn update(&self, state: &mut Self::State, data: &[u8]);

  /// Finish the computation. `out_len` must match the length the state was
  /// initialised with.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::InvalidOutputLength`] on a length mismatch.
  fn finalize(&self, state: Self::State, out_len: usize) -> Result<Blake2bDigest, Blake2bError>;
}

/// One-shot helper over any backend.
///
/// # Errors
///
/// Whatever the backend reports for `key` and `out_len`.
pub fn hash_with_backend<B: Blake2bBackend>(
  backend: &B,
  key: &[u8],
  input: &[u8],
  out_len: usize,
) -> Result<Blake2bDigest, Blake2bError> {
  let mut state = if key.is_empty() {
    backend.init(out_len)?
  } else {
    backend.init_key(out_len, key)?
  };
  backend.update(&mut state, input);
  backend.finalize(state, out_len)
}

/// The in-crate kernels as a [`Blake2bBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoreBackend {
  config: Blake2bConfig,
}

impl CoreBackend {
  /// Backend on the process-default kernel.
  #[must_use]
  pub fn new() -> Self {
    Self {
      config: Blake2bConfig::get(),
    }
  }

  /// Backend pinned to exactly the kernel `force` names.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::UnsupportedBackend`] if this CPU cannot run it.
  pub fn with_force(force: Blake2bForce) -> Result<Self, Blake2bError> {
    Ok(Self {
      config: Blake2bConfig::try_with_force(force)?,
    })
  }

  #[inline]
  #[must_use]
  pub const fn config(&self) -> Blake2bConfig {
    self.config
  }
}

impl Default for CoreBackend {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Blake2bBackend for CoreBackend {
  type State = Blake2bHasher;

  fn name(&self) -> &'static str {
    self.config.kernel().as_str()
  }

  fn init(&self, out_len: usize) -> Result<Self::State, Blake2bError> {
    Blake2bHasher::with_config(&[], out_len, self.config)
  }

  fn init_key(&self, out_len: usize, key: &[u8]) -> Result<Self::State, Blake2bError> {
    Blake2bHasher::with_config(key, out_len, self.config)
  }

  fn update(&self, state: &mut Self::State, data: &[u8]) {
    state.absorb(data);
  }

  fn finalize(&self, mut state: Self::State, out_len: usize) -> Result<Blake2bDigest, Blake2bError> {
    if out_len != state.out_len() {
      return Err(Blake2bError::InvalidOutputLength);
    }
    state.finalize_digest()
  }
}
