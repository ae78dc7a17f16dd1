//! CPU detection and capabilities for the BLAKE2b workspace.
//!
//! This crate is the single source of truth for CPU feature detection. Kernel
//! selection asks `platform::caps()` instead of doing ad-hoc detection.
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::AVX2_READY) {
//!     // 256-bit integer SIMD kernel is safe to call
//! }
//! ```
//!
//! - Compile-time features are picked up via `cfg!`, so `-C target-cpu=native`
//!   builds need no runtime probing.
//! - Runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! - Under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{Detected, detect_uncached};

/// Get detected architecture and CPU capabilities (cached).
#[inline]
#[must_use]
pub fn get() -> Detected {
  detect::get()
}

/// Get just the CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get().caps
}

/// Get the architecture the running binary was built for.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  detect::get().arch
}

/// Human-readable description of the detected platform.
///
/// Formats as `x86_64 [sse2, ssse3, avx, avx2]`.
#[must_use]
pub fn describe() -> Description {
  Description(get())
}

/// Display adapter returned by [`describe`].
#[derive(Clone, Copy, Debug)]
pub struct Description(Detected);

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} [", self.0.arch.as_str())?;
    for (i, name) in self.0.caps.names().enumerate() {
      if i != 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("]")
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;

  #[test]
  #[cfg(not(miri))]
  fn convenience_functions_agree() {
    let det = get();
    assert_eq!(caps(), det.caps);
    assert_eq!(arch(), det.arch);
  }

  #[test]
  fn describe_starts_with_arch() {
    let text = describe().to_string();
    assert!(text.starts_with(arch().as_str()), "{text}");
    assert!(text.ends_with(']'), "{text}");
  }
}
