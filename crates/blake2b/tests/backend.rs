//! A second backend built on `blake2b_simd` must be interchangeable with the
//! in-crate one.

use blake2b::{Blake2bBackend, Blake2bDigest, Blake2bError, Blake2bForce, CoreBackend, hash_with_backend};
use proptest::prelude::*;

struct SimdBackend;

impl Blake2bBackend for SimdBackend {
  type State = (blake2b_simd::State, usize);

  fn name(&self) -> &'static str {
    "blake2b_simd"
  }

  fn init(&self, out_len: usize) -> Result<Self::State, Blake2bError> {
    self.init_key(out_len, &[])
  }

  fn init_key(&self, out_len: usize, key: &[u8]) -> Result<Self::State, Blake2bError> {
    if !(1..=64).contains(&out_len) {
      return Err(Blake2bError::InvalidOutputLength);
    }
    if key.len() > 64 {
      return Err(Blake2bError::InvalidKeyLength);
    }
    Ok((blake2b_simd::Params::new().hash_length(out_len).key(key).to_state(), out_len))
  }

  fn update(&self, state: &mut Self::State, data: &[u8]) {
    state.0.update(data);
  }

  fn finalize(&self, state: Self::State, out_len: usize) -> Result<Blake2bDigest, Blake2bError> {
    if out_len != state.1 {
      return Err(Blake2bError::InvalidOutputLength);
    }
    Blake2bDigest::try_from(state.0.finalize().as_bytes())
  }
}

fn check_interchangeable<A: Blake2bBackend, B: Blake2bBackend>(a: &A, b: &B, key: &[u8], data: &[u8], out_len: usize) {
  let x = hash_with_backend(a, key, data, out_len).unwrap();
  let y = hash_with_backend(b, key, data, out_len).unwrap();
  assert_eq!(x, y, "{} vs {}", a.name(), b.name());
}

proptest! {
  #[test]
  fn core_and_simd_backends_agree(
    key in proptest::collection::vec(any::<u8>(), 0..=64),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
    out_len in 1usize..=64,
  ) {
    check_interchangeable(&CoreBackend::new(), &SimdBackend, &key, &data, out_len);
  }
}

#[test]
fn streaming_through_backend_matches_one_shot() {
  let backend = CoreBackend::new();
  let mut state = backend.init_key(32, b"key").unwrap();
  backend.update(&mut state, b"The quick brown fox ");
  backend.update(&mut state, b"jumps over the lazy dog");
  let streamed = backend.finalize(state, 32).unwrap();
  let one_shot = hash_with_backend(&backend, b"key", b"The quick brown fox jumps over the lazy dog", 32).unwrap();
  assert_eq!(streamed, one_shot);
}

#[test]
fn every_forced_core_backend_agrees_with_simd() {
  for force in [Blake2bForce::Portable, Blake2bForce::Avx2] {
    match CoreBackend::with_force(force) {
      Ok(core) => check_interchangeable(&core, &SimdBackend, b"k", b"interchangeable", 64),
      Err(err) => assert_eq!(err, Blake2bError::UnsupportedBackend),
    }
  }
}

#[test]
fn backends_reject_the_same_arguments() {
  for backend_err in [CoreBackend::new().init(0).err(), SimdBackend.init(0).err()] {
    assert_eq!(backend_err, Some(Blake2bError::InvalidOutputLength));
  }
  assert_eq!(CoreBackend::new().init_key(64, &[0; 65]).err(), Some(Blake2bError::InvalidKeyLength));
  assert_eq!(SimdBackend.init_key(64, &[0; 65]).err(), Some(Blake2bError::InvalidKeyLength));
}
