//! Per-kernel digests for differential testing and fuzzing.

use alloc::vec::Vec;

use crate::{
  Blake2bError, Blake2bHasher,
  config::Blake2bConfig,
  kernels::{ALL, Blake2bKernelId, required_caps},
  output::Blake2bDigest,
};

#[derive(Clone, Debug)]
pub struct KernelResult {
  pub name: &'static str,
  pub digest: Blake2bDigest,
}

fn hasher_for_kernel(id: Blake2bKernelId, key: &[u8], out_len: usize) -> Result<Blake2bHasher, Blake2bError> {
  Blake2bHasher::with_config(key, out_len, Blake2bConfig::for_kernel(id))
}

fn digest_with_kernel(
  id: Blake2bKernelId,
  key: &[u8],
  data: &[u8],
  out_len: usize,
) -> Result<Blake2bDigest, Blake2bError> {
  let mut h = hasher_for_kernel(id, key, out_len)?;
  h.update(data)?;
  h.finalize_digest()
}

/// Digest `data` with every kernel this CPU can run.
///
/// # Errors
///
/// Argument errors for `key` or `out_len`.
pub fn run_all_blake2b_kernels(key: &[u8], data: &[u8], out_len: usize) -> Result<Vec<KernelResult>, Blake2bError> {
  let caps = platform::caps();
  let mut out = Vec::with_capacity(ALL.len());
  for &id in ALL {
    if caps.has(required_caps(id)) {
      out.push(KernelResult {
        name: id.as_str(),
        digest: digest_with_kernel(id, key, data, out_len)?,
      });
    }
  }
  Ok(out)
}

/// Check that every runnable kernel produces the same digest.
///
/// # Errors
///
/// A message naming the failure: bad arguments or a kernel mismatch.
pub fn verify_blake2b_kernels(key: &[u8], data: &[u8], out_len: usize) -> Result<(), &'static str> {
  let results = run_all_blake2b_kernels(key, data, out_len).map_err(Blake2bError::as_str)?;
  let Some((first, rest)) = results.split_first() else {
    return Ok(());
  };
  if rest.iter().any(|r| r.digest != first.digest) {
    return Err("blake2b kernel mismatch");
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pattern(len: usize) -> Vec<u8> {
    (0..len)
      .map(|i| (i as u8).wrapping_mul(31).wrapping_add((i >> 8) as u8))
      .collect()
  }

  #[test]
  fn all_kernels_match_blake2_oracle_and_streaming_splits() {
    let caps = platform::caps();
    let lens = [
      0usize, 1, 2, 3, 63, 64, 65, 127, 128, 129, 255, 256, 257, 1023, 1024, 1025, 10_000,
    ];

    for &id in ALL {
      if !caps.has(required_caps(id)) {
        continue;
      }

      for &len in &lens {
        let msg = pattern(len);
        let ours = digest_with_kernel(id, &[], &msg, 64).unwrap();

        use blake2::Digest as _;
        let expected = blake2::Blake2b512::digest(&msg);
        assert_eq!(ours.as_bytes(), &expected[..], "blake2b oracle mismatch for kernel={}", id.as_str());

        for &chunk in &[1usize, 7, 31, 32, 63, 64, 65, 127, 128, 129, 1024, 4096] {
          let mut h = hasher_for_kernel(id, &[], 64).unwrap();
          for part in msg.chunks(chunk) {
            h.update(part).unwrap();
          }
          assert_eq!(
            h.finalize_digest().unwrap(),
            ours,
            "blake2b streaming mismatch kernel={} len={} chunk={}",
            id.as_str(),
            len,
            chunk
          );
        }
      }
    }
  }

  #[test]
  fn keyed_kernels_agree() {
    for len in [0usize, 1, 128, 129, 300] {
      let msg = pattern(len);
      assert_eq!(verify_blake2b_kernels(b"a key", &msg, 64), Ok(()));
      assert_eq!(verify_blake2b_kernels(&[0xFF; 64], &msg, 17), Ok(()));
    }
  }

  #[test]
  fn bad_arguments_are_reported() {
    assert_eq!(verify_blake2b_kernels(&[], b"", 0), Err("invalid output length"));
  }
}
