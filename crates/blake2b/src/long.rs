//! Extendable output by chained rehashing.
//!
//! `V0 = BLAKE2b-512(le32(L) || input)`, `Vi = BLAKE2b-512(V(i-1))`. The output
//! is `V0 || V1 || ...` cut to `L` bytes; every block, including the trailing
//! partial one, comes from a full 64-byte hash.

use crate::{
  Blake2bError, Blake2bHasher,
  config::Blake2bConfig,
  constants::{KEY_LEN_MAX, OUT_LEN_MAX},
  oneshot::compress_all,
  util::write_state_le,
};

/// Fill `out` with `out.len()` bytes of extended output for `input`.
///
/// An empty `out` is accepted and left as is.
///
/// # Errors
///
/// [`Blake2bError::InvalidOutputLength`] if `out.len()` does not fit in a
/// `u32`.
pub fn hash_long(input: &[u8], out: &mut [u8]) -> Result<(), Blake2bError> {
  hash_long_with(Blake2bConfig::get(), input, out)
}

/// [`hash_long`] on the kernel selected by `config`.
///
/// # Errors
///
/// Same as [`hash_long`].
pub fn hash_long_with(config: Blake2bConfig, input: &[u8], out: &mut [u8]) -> Result<(), Blake2bError> {
  let len = u32::try_from(out.len()).map_err(|_| Blake2bError::InvalidOutputLength)?;
  if len == 0 {
    return Ok(());
  }

  let mut seed = Blake2bHasher::build([0; KEY_LEN_MAX], 0, OUT_LEN_MAX as u8, config);
  seed.absorb(&len.to_le_bytes());
  seed.absorb(input);
  let h0 = seed.final_state();
  let mut v = [0u8; OUT_LEN_MAX];
  write_state_le(&h0, &mut v);

  let (head, rest) = out.split_at_mut(core::cmp::min(out.len(), OUT_LEN_MAX));
  write_state_le(&h0, head);

  let compress = config.compress_fn();
  for chunk in rest.chunks_mut(OUT_LEN_MAX) {
    let h = compress_all(compress, &v, OUT_LEN_MAX as u8);
    write_state_le(&h, &mut v);
    write_state_le(&h, chunk);
  }
  Ok(())
}

/// [`hash_long`] into a freshly allocated buffer of `len` bytes.
///
/// # Errors
///
/// Same as [`hash_long`].
#[cfg(feature = "alloc")]
pub fn hash_long_vec(input: &[u8], len: usize) -> Result<alloc::vec::Vec<u8>, Blake2bError> {
  u32::try_from(len).map_err(|_| Blake2bError::InvalidOutputLength)?;
  let mut out = alloc::vec![0u8; len];
  hash_long(input, &mut out)?;
  Ok(out)
}
