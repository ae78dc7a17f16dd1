//! Runtime CPU detection.
//!
//! - Compile-time detection via `cfg!(target_feature = "...")`
//! - Runtime detection via `is_x86_feature_detected!` when `std` is enabled
//! - Caching via `OnceLock` with `std`, an atomic state machine without
//! - Miri fallback (always portable-only caps)

use crate::caps::{Arch, Caps};

/// Detection result: architecture plus capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  pub arch: Arch,
  pub caps: Caps,
}

impl Detected {
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self {
      arch: Arch::current(),
      caps: Caps::NONE,
    }
  }
}

#[cfg(feature = "std")]
mod cache {
  use std::sync::OnceLock;

  use super::Detected;

  static DETECTED: OnceLock<Detected> = OnceLock::new();

  #[inline]
  pub fn get_or_init(f: fn() -> Detected) -> Detected {
    *DETECTED.get_or_init(f)
  }
}

#[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
mod cache {
  use core::sync::atomic::{AtomicU8, AtomicU64, Ordering};

  use super::Detected;
  use crate::caps::{Arch, Caps};

  /// 0 = uninitialized, 1 = initializing, 2 = initialized
  static STATE: AtomicU8 = AtomicU8::new(0);
  static CACHED_BITS: AtomicU64 = AtomicU64::new(0);

  #[inline]
  pub fn get_or_init(f: fn() -> Detected) -> Detected {
    if STATE.load(Ordering::Acquire) == 2 {
      return load_cached();
    }

    match STATE.compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let result = f();
        CACHED_BITS.store(result.caps.bits(), Ordering::Relaxed);
        STATE.store(2, Ordering::Release);
        result
      }
      Err(1) => {
        while STATE.load(Ordering::Acquire) == 1 {
          core::hint::spin_loop();
        }
        load_cached()
      }
      Err(_) => load_cached(),
    }
  }

  fn load_cached() -> Detected {
    Detected {
      arch: Arch::current(),
      caps: Caps::from_bits(CACHED_BITS.load(Ordering::Relaxed)),
    }
  }
}

#[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
mod cache {
  use super::Detected;

  // Single-threaded targets: detection is compile-time only, so just recompute.
  #[inline]
  pub fn get_or_init(f: fn() -> Detected) -> Detected {
    f()
  }
}

/// Features enabled at compile time (`-C target-feature` / `target-cpu`).
#[must_use]
fn caps_static() -> Caps {
  use crate::caps::{aarch64, x86};

  let mut caps = Caps::NONE;
  if cfg!(target_feature = "sse2") {
    caps = caps | x86::SSE2;
  }
  if cfg!(target_feature = "ssse3") {
    caps = caps | x86::SSSE3;
  }
  if cfg!(target_feature = "sse4.1") {
    caps = caps | x86::SSE41;
  }
  if cfg!(target_feature = "avx") {
    caps = caps | x86::AVX;
  }
  if cfg!(target_feature = "avx2") {
    caps = caps | x86::AVX2;
  }
  if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
    caps = caps | aarch64::NEON;
  }
  caps
}

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn caps_runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse2") {
    caps = caps | x86::SSE2;
  }
  if std::arch::is_x86_feature_detected!("ssse3") {
    caps = caps | x86::SSSE3;
  }
  if std::arch::is_x86_feature_detected!("sse4.1") {
    caps = caps | x86::SSE41;
  }
  // `is_x86_feature_detected!` checks OSXSAVE/XCR0 for the YMM state too.
  if std::arch::is_x86_feature_detected!("avx") {
    caps = caps | x86::AVX;
  }
  if std::arch::is_x86_feature_detected!("avx2") {
    caps = caps | x86::AVX2;
  }
  caps
}

#[cfg(not(all(target_arch = "x86_64", feature = "std")))]
fn caps_runtime() -> Caps {
  Caps::NONE
}

/// Run detection without consulting the cache.
#[must_use]
pub fn detect_uncached() -> Detected {
  if cfg!(miri) {
    return Detected::portable();
  }
  Detected {
    arch: Arch::current(),
    caps: caps_static().union(caps_runtime()),
  }
}

#[inline]
#[must_use]
pub fn get() -> Detected {
  cache::get_or_init(detect_uncached)
}
