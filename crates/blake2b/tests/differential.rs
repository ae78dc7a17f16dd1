use blake2b::{Blake2b512, Blake2bHasher, Digest as _, hash};
use proptest::prelude::*;

fn blake2b512_ref(data: &[u8]) -> [u8; 64] {
  use blake2::Digest as _;
  let out = blake2::Blake2b512::digest(data);
  let mut bytes = [0u8; 64];
  bytes.copy_from_slice(&out);
  bytes
}

fn blake2b_var_ref(data: &[u8], out_len: usize) -> Vec<u8> {
  use blake2::digest::{Update, VariableOutput};
  let mut h = blake2::Blake2bVar::new(out_len).unwrap();
  h.update(data);
  let mut out = vec![0u8; out_len];
  h.finalize_variable(&mut out).unwrap();
  out
}

fn blake2b_keyed_ref(key: &[u8], data: &[u8], out_len: usize) -> Vec<u8> {
  blake2b_simd::Params::new()
    .hash_length(out_len)
    .key(key)
    .hash(data)
    .as_bytes()
    .to_vec()
}

fn feed_in_steps(h: &mut Blake2bHasher, data: &[u8]) {
  let mut i = 0usize;
  while i < data.len() {
    let step = (data[i] as usize % 97) + 1;
    let end = core::cmp::min(data.len(), i + step);
    h.update(&data[i..end]).unwrap();
    i = end;
  }
}

proptest! {
  #[test]
  fn blake2b512_one_shot_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    prop_assert_eq!(Blake2b512::digest(&data), blake2b512_ref(&data));
  }

  #[test]
  fn blake2b512_streaming_matches_blake2(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
    let expected = blake2b512_ref(&data);
    let mut h = Blake2b512::new();

    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      h.update(&data[i..end]);
      i = end;
    }
    prop_assert_eq!(h.finalize(), expected);
  }

  #[test]
  fn variable_length_matches_blake2_var(
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 1usize..=64,
  ) {
    let expected = blake2b_var_ref(&data, out_len);
    let one_shot = hash(&data, out_len).unwrap();
    prop_assert_eq!(one_shot.as_bytes(), &expected[..]);

    let mut h = Blake2bHasher::new(out_len).unwrap();
    feed_in_steps(&mut h, &data);
    let streamed = h.finalize_digest().unwrap();
    prop_assert_eq!(streamed.as_bytes(), &expected[..]);
  }

  #[test]
  fn keyed_matches_blake2b_simd(
    key in proptest::collection::vec(any::<u8>(), 0..=64),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 1usize..=64,
  ) {
    let expected = blake2b_keyed_ref(&key, &data, out_len);
    let mut h = Blake2bHasher::new_keyed(&key, out_len).unwrap();
    feed_in_steps(&mut h, &data);
    let tag = h.finalize_digest().unwrap();
    prop_assert_eq!(tag.as_bytes(), &expected[..]);
  }
}

#[test]
fn keyed_512_matches_blake2_mac() {
  use blake2::digest::{KeyInit, Mac};
  let key = b"secret-key";
  let msg = b"The quick brown fox jumps over the lazy dog";

  let mut mac = <blake2::Blake2bMac512 as KeyInit>::new_from_slice(key).unwrap();
  mac.update(msg);
  let expected = mac.finalize().into_bytes();

  let mut h = Blake2bHasher::new_keyed(key, 64).unwrap();
  h.update(msg).unwrap();
  assert_eq!(h.finalize_digest().unwrap().as_bytes(), &expected[..]);
}
