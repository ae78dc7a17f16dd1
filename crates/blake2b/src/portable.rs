//! Portable scalar compression function.

#![allow(clippy::indexing_slicing)] // Compression schedule uses fixed indices
#![allow(clippy::many_single_char_names)]

use crate::{
  constants::{BLOCK_LEN, IV, SIGMA},
  util::rotr64,
};

#[inline(always)]
fn g(a: &mut u64, b: &mut u64, c: &mut u64, d: &mut u64, x: u64, y: u64) {
  *a = a.wrapping_add(*b).wrapping_add(x);
  *d = rotr64(*d ^ *a, 32);
  *c = c.wrapping_add(*d);
  *b = rotr64(*b ^ *c, 24);
  *a = a.wrapping_add(*b).wrapping_add(y);
  *d = rotr64(*d ^ *a, 16);
  *c = c.wrapping_add(*d);
  *b = rotr64(*b ^ *c, 63);
}

/// Compress one block into `h`.
///
/// `t` is the byte count after absorbing this block; `is_last` sets the
/// finalization flag.
#[inline]
pub fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (w, c) in m.iter_mut().zip(chunks) {
    *w = u64::from_le_bytes(*c);
  }

  let mut v0 = h[0];
  let mut v1 = h[1];
  let mut v2 = h[2];
  let mut v3 = h[3];
  let mut v4 = h[4];
  let mut v5 = h[5];
  let mut v6 = h[6];
  let mut v7 = h[7];

  let mut v8 = IV[0];
  let mut v9 = IV[1];
  let mut v10 = IV[2];
  let mut v11 = IV[3];
  let mut v12 = IV[4] ^ t;
  let mut v13 = IV[5];
  let mut v14 = if is_last { !IV[6] } else { IV[6] };
  let mut v15 = IV[7];

  macro_rules! round {
    ($r:expr) => {{
      let s = &SIGMA[$r];

      g(&mut v0, &mut v4, &mut v8, &mut v12, m[s[0]], m[s[1]]);
      g(&mut v1, &mut v5, &mut v9, &mut v13, m[s[2]], m[s[3]]);
      g(&mut v2, &mut v6, &mut v10, &mut v14, m[s[4]], m[s[5]]);
      g(&mut v3, &mut v7, &mut v11, &mut v15, m[s[6]], m[s[7]]);

      g(&mut v0, &mut v5, &mut v10, &mut v15, m[s[8]], m[s[9]]);
      g(&mut v1, &mut v6, &mut v11, &mut v12, m[s[10]], m[s[11]]);
      g(&mut v2, &mut v7, &mut v8, &mut v13, m[s[12]], m[s[13]]);
      g(&mut v3, &mut v4, &mut v9, &mut v14, m[s[14]], m[s[15]]);
    }};
  }

  round!(0);
  round!(1);
  round!(2);
  round!(3);
  round!(4);
  round!(5);
  round!(6);
  round!(7);
  round!(8);
  round!(9);
  round!(10);
  round!(11);

  h[0] ^= v0 ^ v8;
  h[1] ^= v1 ^ v9;
  h[2] ^= v2 ^ v10;
  h[3] ^= v3 ^ v11;
  h[4] ^= v4 ^ v12;
  h[5] ^= v5 ^ v13;
  h[6] ^= v6 ^ v14;
  h[7] ^= v7 ^ v15;
}
