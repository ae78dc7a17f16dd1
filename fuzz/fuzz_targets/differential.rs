//! Differential fuzzing against the RustCrypto `blake2` crate, plus
//! agreement between every compression kernel this CPU can run.

#![no_main]

use blake2b::{Digest as _, __internal};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  test_blake2b512_differential(data);
  test_kernels_agree(data);
});

fn test_blake2b512_differential(data: &[u8]) {
  use blake2::Digest as _;

  let ours = blake2b::Blake2b512::digest(data);
  let reference = blake2::Blake2b512::digest(data);

  assert_eq!(
    &ours[..],
    &reference[..],
    "BLAKE2b-512 differential mismatch, len={}",
    data.len()
  );
}

fn test_kernels_agree(data: &[u8]) {
  // First byte picks the key length so keyed paths are covered too.
  let (key, msg) = match data.split_first() {
    Some((&k, rest)) => rest.split_at(usize::from(k % 65).min(rest.len())),
    None => (&[][..], data),
  };
  if let Err(err) = __internal::verify_blake2b_kernels(key, msg, 64) {
    panic!("{err}: key_len={} len={}", key.len(), msg.len());
  }
}
