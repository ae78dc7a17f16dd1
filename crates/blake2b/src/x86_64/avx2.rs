//! BLAKE2b x86_64 AVX2 compression kernel.
//!
//! The working vector lives in four rows of four u64 lanes:
//! `a = v[0..4]`, `b = v[4..8]`, `c = v[8..12]`, `d = v[12..16]`. A column
//! step runs G on all four lanes at once. Before the diagonal step, rows
//! `b`, `c`, `d` are rotated left by one, two and three lanes so the diagonals
//! line up as columns; they are rotated back afterwards.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::inline_always)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::many_single_char_names)]

use core::arch::x86_64::*;

use crate::constants::{BLOCK_LEN, IV, SIGMA};

#[inline(always)]
unsafe fn loadu(src: *const u64) -> __m256i {
  _mm256_loadu_si256(src.cast())
}

#[inline(always)]
unsafe fn storeu(src: __m256i, dest: *mut u64) {
  _mm256_storeu_si256(dest.cast(), src)
}

#[inline(always)]
unsafe fn add(a: __m256i, b: __m256i) -> __m256i {
  _mm256_add_epi64(a, b)
}

#[inline(always)]
unsafe fn xor(a: __m256i, b: __m256i) -> __m256i {
  _mm256_xor_si256(a, b)
}

#[inline(always)]
unsafe fn set4(a: u64, b: u64, c: u64, d: u64) -> __m256i {
  _mm256_setr_epi64x(a as i64, b as i64, c as i64, d as i64)
}

#[inline(always)]
unsafe fn rot32(x: __m256i) -> __m256i {
  _mm256_or_si256(_mm256_srli_epi64(x, 32), _mm256_slli_epi64(x, 32))
}

#[inline(always)]
unsafe fn rot24(x: __m256i) -> __m256i {
  _mm256_or_si256(_mm256_srli_epi64(x, 24), _mm256_slli_epi64(x, 40))
}

#[inline(always)]
unsafe fn rot16(x: __m256i) -> __m256i {
  _mm256_or_si256(_mm256_srli_epi64(x, 16), _mm256_slli_epi64(x, 48))
}

#[inline(always)]
unsafe fn rot63(x: __m256i) -> __m256i {
  _mm256_or_si256(_mm256_srli_epi64(x, 63), _mm256_slli_epi64(x, 1))
}

#[inline(always)]
unsafe fn g(a: &mut __m256i, b: &mut __m256i, c: &mut __m256i, d: &mut __m256i, x: __m256i, y: __m256i) {
  *a = add(add(*a, *b), x);
  *d = rot32(xor(*d, *a));
  *c = add(*c, *d);
  *b = rot24(xor(*b, *c));
  *a = add(add(*a, *b), y);
  *d = rot16(xor(*d, *a));
  *c = add(*c, *d);
  *b = rot63(xor(*b, *c));
}

// Lane i of b/c/d becomes b[i+1], c[i+2], d[i+3], so lane i of (a, b, c, d)
// holds the i-th diagonal: (0,5,10,15), (1,6,11,12), (2,7,8,13), (3,4,9,14).
#[inline(always)]
unsafe fn diagonalize(b: &mut __m256i, c: &mut __m256i, d: &mut __m256i) {
  *b = _mm256_permute4x64_epi64(*b, 0x39);
  *c = _mm256_permute4x64_epi64(*c, 0x4e);
  *d = _mm256_permute4x64_epi64(*d, 0x93);
}

#[inline(always)]
unsafe fn undiagonalize(b: &mut __m256i, c: &mut __m256i, d: &mut __m256i) {
  *b = _mm256_permute4x64_epi64(*b, 0x93);
  *c = _mm256_permute4x64_epi64(*c, 0x4e);
  *d = _mm256_permute4x64_epi64(*d, 0x39);
}

/// AVX2 compression of one block into `h`.
///
/// # Safety
///
/// Caller must ensure AVX2 is available.
#[target_feature(enable = "avx2")]
pub unsafe fn compress_avx2(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  let (chunks, _) = block.as_chunks::<8>();
  let mut m = [0u64; 16];
  for (w, c) in m.iter_mut().zip(chunks) {
    *w = u64::from_le_bytes(*c);
  }

  let f = if is_last { u64::MAX } else { 0 };

  // SAFETY: AVX2 is enabled for this function; `h` holds 8 words, so both
  // 4-word loads and stores stay in bounds.
  unsafe {
    let h_lo = loadu(h.as_ptr());
    let h_hi = loadu(h.as_ptr().add(4));

    let mut a = h_lo;
    let mut b = h_hi;
    let mut c = set4(IV[0], IV[1], IV[2], IV[3]);
    let mut d = xor(set4(IV[4], IV[5], IV[6], IV[7]), set4(t, 0, f, 0));

    for s in &SIGMA {
      g(
        &mut a,
        &mut b,
        &mut c,
        &mut d,
        set4(m[s[0]], m[s[2]], m[s[4]], m[s[6]]),
        set4(m[s[1]], m[s[3]], m[s[5]], m[s[7]]),
      );
      diagonalize(&mut b, &mut c, &mut d);
      g(
        &mut a,
        &mut b,
        &mut c,
        &mut d,
        set4(m[s[8]], m[s[10]], m[s[12]], m[s[14]]),
        set4(m[s[9]], m[s[11]], m[s[13]], m[s[15]]),
      );
      undiagonalize(&mut b, &mut c, &mut d);
    }

    storeu(xor(h_lo, xor(a, c)), h.as_mut_ptr());
    storeu(xor(h_hi, xor(b, d)), h.as_mut_ptr().add(4));
  }
}

/// Safe entry point stored in the kernel table.
#[inline]
pub(crate) fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  debug_assert!(platform::caps().has(platform::caps::x86::AVX2_READY));
  // SAFETY: only reachable through `kernels::compress_fn(Blake2bKernelId::X86Avx2)`,
  // which callers obtain after checking `required_caps` against the CPU.
  unsafe { compress_avx2(h, block, t, is_last) }
}
