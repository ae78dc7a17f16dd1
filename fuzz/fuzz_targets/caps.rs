//! Fuzz target for `Caps` bitset operations.

#![no_main]

use libfuzzer_sys::fuzz_target;
use platform::Caps;

fuzz_target!(|data: (u64, u64)| {
  let a = Caps::from_raw(data.0);
  let b = Caps::from_raw(data.1);

  assert!(a.has(a), "caps must contain itself");
  assert!(a.has(Caps::NONE), "every set contains the empty set");
  assert_eq!(a | b, b | a, "union must be commutative");
  assert!((a | b).has(a) && (a | b).has(b), "union must contain both operands");
  assert!(!a.difference(b).has(b) || b.is_empty(), "difference must drop the subtrahend");
  assert_eq!(a.is_empty(), a.bits() == 0);
  assert_eq!(a.names().count() as u32, (a.bits() & known_mask()).count_ones());
});

fn known_mask() -> u64 {
  use platform::caps::{aarch64, x86};
  (x86::SSE2 | x86::SSSE3 | x86::SSE41 | x86::AVX | x86::AVX2 | aarch64::NEON).bits()
}
