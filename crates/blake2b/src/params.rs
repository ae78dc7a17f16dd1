//! Parameter block (RFC 7693 §2.5) for sequential, single-node hashing.

#![allow(clippy::indexing_slicing)] // Fixed offsets into a 64-byte array

use crate::{
  Blake2bError,
  constants::{IV, KEY_LEN_MAX, OUT_LEN_MAX, PARAM_LEN},
};

const DIGEST_LENGTH: usize = 0;
const KEY_LENGTH: usize = 1;
const FANOUT: usize = 2;
const DEPTH: usize = 3;
// 4..8 leaf_length, 8..16 node_offset, 16 node_depth, 17 inner_length,
// 18..32 reserved, 32..48 salt, 48..64 personalization: all zero here.

/// The 64-byte BLAKE2b parameter block.
///
/// Only digest length and key length vary; fanout and depth are fixed at 1 and
/// every other field is zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamBlock([u8; PARAM_LEN]);

impl ParamBlock {
  /// Build the block. Lengths are validated by the caller.
  #[inline]
  #[must_use]
  pub const fn new(digest_len: u8, key_len: u8) -> Self {
    debug_assert!(digest_len as usize >= 1 && digest_len as usize <= OUT_LEN_MAX);
    debug_assert!(key_len as usize <= KEY_LEN_MAX);
    let mut block = [0u8; PARAM_LEN];
    block[DIGEST_LENGTH] = digest_len;
    block[KEY_LENGTH] = key_len;
    block[FANOUT] = 1;
    block[DEPTH] = 1;
    Self(block)
  }

  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; PARAM_LEN] {
    &self.0
  }

  /// Initial chaining state: `IV[i] ^ le_u64(block[8i..8i + 8])`.
  #[inline]
  #[must_use]
  pub fn chaining_state(&self) -> [u64; 8] {
    let (words, _) = self.0.as_chunks::<8>();
    let mut h = IV;
    for (hi, word) in h.iter_mut().zip(words) {
      *hi ^= u64::from_le_bytes(*word);
    }
    h
  }
}

/// Validate a digest length, returning it as the parameter-block byte.
#[inline]
pub(crate) fn checked_out_len(out_len: usize) -> Result<u8, Blake2bError> {
  match u8::try_from(out_len) {
    Ok(n) if (1..=OUT_LEN_MAX as u8).contains(&n) => Ok(n),
    _ => Err(Blake2bError::InvalidOutputLength),
  }
}

/// Validate a key length, returning it as the parameter-block byte.
#[inline]
pub(crate) fn checked_key_len(key: &[u8]) -> Result<u8, Blake2bError> {
  match u8::try_from(key.len()) {
    Ok(n) if usize::from(n) <= KEY_LEN_MAX => Ok(n),
    _ => Err(Blake2bError::InvalidKeyLength),
  }
}
