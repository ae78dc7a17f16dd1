//! CPU capability representation.
//!
//! This module answers the question: "What instructions can I legally run on
//! this machine?"
//!
//! [`Caps`] is a 64-bit feature bitset. Bits are architecture-specific but the
//! API is uniform across all targets.

use core::fmt;

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Create a capability set from its raw bits.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  #[inline]
  pub(crate) const fn from_bits(bits: u64) -> Self {
    Self(bits)
  }

  /// Raw bits of the set.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u64 {
    self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Features in `self` that are not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1u64 << (bit % 64))
  }

  /// Iterate the names of the features present in this set.
  pub fn names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES
      .iter()
      .filter(move |(caps, _)| self.has(*caps))
      .map(|(_, name)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.names()).finish()
  }
}

/// x86 / x86_64 feature bits.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(1);
  pub const SSE41: Caps = Caps::bit(2);
  pub const AVX: Caps = Caps::bit(3);
  pub const AVX2: Caps = Caps::bit(4);

  /// Everything a 256-bit integer kernel needs (OS-enabled YMM state + AVX2).
  pub const AVX2_READY: Caps = AVX.union(AVX2);
}

/// aarch64 feature bits.
pub mod aarch64 {
  use super::Caps;

  pub const NEON: Caps = Caps::bit(16);
}

const FEATURE_NAMES: &[(Caps, &str)] = &[
  (x86::SSE2, "sse2"),
  (x86::SSSE3, "ssse3"),
  (x86::SSE41, "sse4.1"),
  (x86::AVX, "avx"),
  (x86::AVX2, "avx2"),
  (aarch64::NEON, "neon"),
];

/// Target architecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}
