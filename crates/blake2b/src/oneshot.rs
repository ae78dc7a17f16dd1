//! Unkeyed single-buffer hashing.

use crate::{
  Blake2bError,
  config::Blake2bConfig,
  constants::{BLOCK_LEN, OUT_LEN_MAX},
  kernels::CompressFn,
  output::Blake2bDigest,
  params::{ParamBlock, checked_out_len},
  util::write_state_le,
};

/// Hash `input` in full and return the final chaining state.
///
/// Every block but the last goes through non-final; the last one (which may be
/// full, partial, or empty) is zero-padded and marked final.
pub(crate) fn compress_all(compress: CompressFn, input: &[u8], out_len: u8) -> [u64; 8] {
  let mut h = ParamBlock::new(out_len, 0).chaining_state();
  let (blocks, rest) = input.as_chunks::<BLOCK_LEN>();
  let (full, tail): (&[[u8; BLOCK_LEN]], &[u8]) = match blocks.split_last() {
    Some((last, init)) if rest.is_empty() => (init, last),
    _ => (blocks, rest),
  };

  let mut t = 0u64;
  for block in full {
    t = t.wrapping_add(BLOCK_LEN as u64);
    compress(&mut h, block, t, false);
  }

  let mut last = [0u8; BLOCK_LEN];
  if let Some(dst) = last.get_mut(..tail.len()) {
    dst.copy_from_slice(tail);
  }
  t = t.wrapping_add(tail.len() as u64);
  compress(&mut h, &last, t, true);
  h
}

/// Write the `out_len`-byte digest of `input` into `out[..out_len]`.
///
/// # Errors
///
/// [`Blake2bError::InvalidOutputLength`] unless `1 <= out_len <= 64`,
/// [`Blake2bError::BufferTooSmall`] if `out.len() < out_len`.
pub fn compute_hash(input: &[u8], out: &mut [u8], out_len: usize) -> Result<(), Blake2bError> {
  compute_hash_with(Blake2bConfig::get(), input, out, out_len)
}

/// [`compute_hash`] on the kernel selected by `config`.
///
/// # Errors
///
/// Same as [`compute_hash`].
pub fn compute_hash_with(
  config: Blake2bConfig,
  input: &[u8],
  out: &mut [u8],
  out_len: usize,
) -> Result<(), Blake2bError> {
  let len = checked_out_len(out_len)?;
  let dst = out.get_mut(..out_len).ok_or(Blake2bError::BufferTooSmall)?;
  let h = compress_all(config.compress_fn(), input, len);
  write_state_le(&h, dst);
  Ok(())
}

/// The `out_len`-byte digest of `input`.
///
/// # Errors
///
/// [`Blake2bError::InvalidOutputLength`] unless `1 <= out_len <= 64`.
pub fn hash(input: &[u8], out_len: usize) -> Result<Blake2bDigest, Blake2bError> {
  hash_with(Blake2bConfig::get(), input, out_len)
}

/// [`hash`] on the kernel selected by `config`.
///
/// # Errors
///
/// Same as [`hash`].
pub fn hash_with(config: Blake2bConfig, input: &[u8], out_len: usize) -> Result<Blake2bDigest, Blake2bError> {
  let len = checked_out_len(out_len)?;
  let mut bytes = [0u8; OUT_LEN_MAX];
  compute_hash_with(config, input, &mut bytes, out_len)?;
  Ok(Blake2bDigest::new(bytes, len))
}
