//! Streaming BLAKE2b: keyed or unkeyed, 1 to 64 byte digests.
//!
//! The last block of the message must be compressed with the final flag set,
//! so a full pending buffer is only flushed once more input arrives. A key is
//! loaded as a zero-padded first block through the same buffer, which makes a
//! keyed hash of the empty message compress that block as final.

#![allow(clippy::indexing_slicing)] // Buffer offsets are bounded by BLOCK_LEN

use core::fmt;

use subtle::ConstantTimeEq;
use traits::{Digest, VerificationError};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
  Blake2bError,
  config::Blake2bConfig,
  constants::{BLOCK_LEN, KEY_LEN_MAX, OUT_LEN_MAX},
  kernels::CompressFn,
  output::Blake2bDigest,
  params::{ParamBlock, checked_key_len, checked_out_len},
  util::write_state_le,
};

/// Incremental BLAKE2b hasher.
///
/// `Ready` until [`finalize`](Self::finalize) succeeds, then `Finalized`
/// until [`reset`](Self::reset). The compression kernel is captured from the
/// [`Blake2bConfig`] at construction and never changes afterwards.
#[derive(Clone)]
pub struct Blake2bHasher {
  h: [u64; 8],
  buf: [u8; BLOCK_LEN],
  buf_len: usize,
  t: u64,
  out_len: u8,
  key: [u8; KEY_LEN_MAX],
  key_len: u8,
  finalized: bool,
  config: Blake2bConfig,
  compress: CompressFn,
}

impl Blake2bHasher {
  /// Unkeyed hasher producing `out_len` bytes.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::InvalidOutputLength`] unless `1 <= out_len <= 64`.
  pub fn new(out_len: usize) -> Result<Self, Blake2bError> {
    Self::with_config(&[], out_len, Blake2bConfig::get())
  }

  /// Keyed hasher (BLAKE2b-MAC) producing `out_len` bytes.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::InvalidKeyLength`] if `key` is longer than 64 bytes,
  /// [`Blake2bError::InvalidOutputLength`] unless `1 <= out_len <= 64`.
  pub fn new_keyed(key: &[u8], out_len: usize) -> Result<Self, Blake2bError> {
    Self::with_config(key, out_len, Blake2bConfig::get())
  }

  /// Hasher pinned to the kernel selected by `config`. An empty `key` means
  /// unkeyed.
  ///
  /// # Errors
  ///
  /// Same as [`new_keyed`](Self::new_keyed).
  pub fn with_config(key: &[u8], out_len: usize, config: Blake2bConfig) -> Result<Self, Blake2bError> {
    let key_len = checked_key_len(key)?;
    let out_len = checked_out_len(out_len)?;
    let mut stored = [0u8; KEY_LEN_MAX];
    stored[..key.len()].copy_from_slice(key);
    Ok(Self::build(stored, key_len, out_len, config))
  }

  /// Infallible constructor for already-validated lengths.
  pub(crate) fn build(key: [u8; KEY_LEN_MAX], key_len: u8, out_len: u8, config: Blake2bConfig) -> Self {
    let mut hasher = Self {
      h: [0; 8],
      buf: [0; BLOCK_LEN],
      buf_len: 0,
      t: 0,
      out_len,
      key,
      key_len,
      finalized: false,
      config,
      compress: config.compress_fn(),
    };
    hasher.init();
    hasher
  }

  fn init(&mut self) {
    self.h = ParamBlock::new(self.out_len, self.key_len).chaining_state();
    self.buf = [0; BLOCK_LEN];
    self.t = 0;
    self.finalized = false;
    if self.key_len == 0 {
      self.buf_len = 0;
    } else {
      let n = usize::from(self.key_len);
      self.buf[..n].copy_from_slice(&self.key[..n]);
      self.buf_len = BLOCK_LEN;
    }
  }

  /// Feed more input.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::AlreadyFinalized`] after a successful `finalize`.
  pub fn update(&mut self, data: &[u8]) -> Result<(), Blake2bError> {
    if self.finalized {
      return Err(Blake2bError::AlreadyFinalized);
    }
    self.absorb(data);
    Ok(())
  }

  #[inline]
  fn compress_block(&mut self, block: &[u8; BLOCK_LEN]) {
    self.t = self.t.wrapping_add(BLOCK_LEN as u64);
    (self.compress)(&mut self.h, block, self.t, false);
  }

  pub(crate) fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK_LEN - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      // A full buffer is only known to be non-final once more input shows up.
      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        let block = self.buf;
        self.compress_block(&block);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    let (to_compress, held) = match blocks.split_last() {
      Some((last, init)) if rest.is_empty() => (init, Some(last)),
      _ => (blocks, None),
    };
    for block in to_compress {
      self.compress_block(block);
    }
    if let Some(last) = held {
      self.buf.copy_from_slice(last);
      self.buf_len = BLOCK_LEN;
    }

    if !rest.is_empty() {
      self.buf[..rest.len()].copy_from_slice(rest);
      self.buf_len = rest.len();
    }
  }

  /// Run the final compression on a copy of the state.
  pub(crate) fn final_state(&self) -> [u64; 8] {
    let mut h = self.h;
    let mut block = self.buf;
    block[self.buf_len..].fill(0);
    let t = self.t.wrapping_add(self.buf_len as u64);
    (self.compress)(&mut h, &block, t, true);
    block.zeroize();
    h
  }

  /// Write the digest into `out[..out_len]` and enter the finalized state.
  ///
  /// Bytes of `out` past the digest length are left untouched.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::AlreadyFinalized`] if already finalized,
  /// [`Blake2bError::BufferTooSmall`] if `out` is shorter than the digest
  /// length. The hasher is unchanged on error.
  pub fn finalize(&mut self, out: &mut [u8]) -> Result<(), Blake2bError> {
    if self.finalized {
      return Err(Blake2bError::AlreadyFinalized);
    }
    let dst = out
      .get_mut(..usize::from(self.out_len))
      .ok_or(Blake2bError::BufferTooSmall)?;
    let mut h = self.final_state();
    write_state_le(&h, dst);
    h.zeroize();
    self.finalized = true;
    Ok(())
  }

  /// Finalize into an owned [`Blake2bDigest`].
  ///
  /// # Errors
  ///
  /// [`Blake2bError::AlreadyFinalized`] if already finalized.
  pub fn finalize_digest(&mut self) -> Result<Blake2bDigest, Blake2bError> {
    let mut bytes = [0u8; OUT_LEN_MAX];
    self.finalize(&mut bytes)?;
    Ok(Blake2bDigest::new(bytes, self.out_len))
  }

  /// Finalize and compare against an expected tag in constant time.
  ///
  /// # Errors
  ///
  /// [`VerificationError`] if the tag does not match, has the wrong length, or
  /// the hasher was already finalized.
  pub fn verify(&mut self, expected: &[u8]) -> Result<(), VerificationError> {
    let digest = self.finalize_digest().map_err(|_| VerificationError::new())?;
    if bool::from(digest.as_bytes().ct_eq(expected)) {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }

  /// Back to the initial state, re-loading the key if there is one.
  pub fn reset(&mut self) {
    self.init();
  }

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub fn out_len(&self) -> usize {
    usize::from(self.out_len)
  }

  #[inline]
  #[must_use]
  pub fn is_keyed(&self) -> bool {
    self.key_len != 0
  }

  #[inline]
  #[must_use]
  pub fn is_finalized(&self) -> bool {
    self.finalized
  }

  #[inline]
  #[must_use]
  pub fn config(&self) -> Blake2bConfig {
    self.config
  }

  /// Name of the compression kernel this hasher runs.
  #[inline]
  #[must_use]
  pub fn kernel_name(&self) -> &'static str {
    self.config.kernel().as_str()
  }
}

impl fmt::Debug for Blake2bHasher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Blake2bHasher")
      .field("out_len", &self.out_len)
      .field("keyed", &self.is_keyed())
      .field("finalized", &self.finalized)
      .field("kernel", &self.kernel_name())
      .finish_non_exhaustive()
  }
}

impl Drop for Blake2bHasher {
  fn drop(&mut self) {
    self.h.zeroize();
    self.buf.zeroize();
    self.key.zeroize();
  }
}

impl ZeroizeOnDrop for Blake2bHasher {}

/// BLAKE2b-512: unkeyed, 64-byte output.
///
/// Implements [`Digest`], whose `finalize` borrows the hasher and may be
/// called any number of times.
#[derive(Clone, Debug)]
pub struct Blake2b512 {
  inner: Blake2bHasher,
}

impl Blake2b512 {
  #[must_use]
  pub fn with_config(config: Blake2bConfig) -> Self {
    Self {
      inner: Blake2bHasher::build([0; KEY_LEN_MAX], 0, OUT_LEN_MAX as u8, config),
    }
  }

  #[inline]
  #[must_use]
  pub fn kernel_name(&self) -> &'static str {
    self.inner.kernel_name()
  }
}

impl Default for Blake2b512 {
  #[inline]
  fn default() -> Self {
    Self::with_config(Blake2bConfig::get())
  }
}

impl Digest for Blake2b512 {
  const OUTPUT_SIZE: usize = OUT_LEN_MAX;
  type Output = [u8; OUT_LEN_MAX];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.inner.absorb(data);
  }

  fn finalize(&self) -> Self::Output {
    let mut h = self.inner.final_state();
    let mut out = [0u8; OUT_LEN_MAX];
    write_state_le(&h, &mut out);
    h.zeroize();
    out
  }

  #[inline]
  fn reset(&mut self) {
    self.inner.reset();
  }
}
