//! Fuzz target for the streaming BLAKE2b API.
//!
//! Arbitrary update splits, keys and output lengths must reproduce the
//! one-shot digest, and finalize/reset must follow the state machine.

#![no_main]

use arbitrary::Arbitrary;
use blake2b::{Blake2bError, Blake2bHasher};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  key: Vec<u8>,
  out_len: u8,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let out_len = usize::from(input.out_len % 64) + 1;
  let key = &input.key[..input.key.len().min(64)];

  let mut whole = Blake2bHasher::new_keyed(key, out_len).unwrap();
  whole.update(&input.data).unwrap();
  let expected = whole.finalize_digest().unwrap();
  assert_eq!(whole.update(b"x"), Err(Blake2bError::AlreadyFinalized));

  let mut hasher = Blake2bHasher::new_keyed(key, out_len).unwrap();
  let data = &input.data;
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      (input.chunk_sizes[chunk_idx % input.chunk_sizes.len()] % 512).max(1)
    };

    let end = (offset + chunk_size).min(data.len());
    hasher.update(&data[offset..end]).unwrap();
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(hasher.finalize_digest().unwrap(), expected, "streaming mismatch");

  whole.reset();
  whole.update(&input.data).unwrap();
  assert_eq!(whole.finalize_digest().unwrap(), expected, "reset mismatch");
});
