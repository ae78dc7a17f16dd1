#![allow(clippy::indexing_slicing)] // Fixed-size array indexing and block parsing

#[inline(always)]
pub const fn rotr64(x: u64, n: u32) -> u64 {
  x.rotate_right(n)
}

/// Serialize the chaining state little-endian into `out`, truncating the last
/// word when `out.len()` is not a multiple of 8. `out.len()` must be at most 64.
#[inline]
pub fn write_state_le(h: &[u64; 8], out: &mut [u8]) {
  debug_assert!(out.len() <= 64);
  for (chunk, word) in out.chunks_mut(8).zip(h) {
    let n = chunk.len();
    chunk.copy_from_slice(&word.to_le_bytes()[..n]);
  }
}
