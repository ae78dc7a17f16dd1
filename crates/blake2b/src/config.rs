//! BLAKE2b runtime configuration (kernel overrides).
//!
//! The portable and AVX2 kernels produce identical digests; forcing one only
//! changes the code path, which is what equivalence tests and benchmarks need.
//!
//! Sources, in order of precedence:
//! - an explicit [`Blake2bConfig`] passed to a hasher or one-shot call
//! - `RSCRYPTO_BLAKE2B_FORCE` (read once per process, `std` only)
//! - automatic selection from detected CPU capabilities
//!
//! Safety note: forced modes are clamped to detected CPU capabilities, except
//! through [`Blake2bConfig::try_with_force`], which reports
//! [`Blake2bError::UnsupportedBackend`] instead.

use platform::Caps;

use crate::{
  Blake2bError,
  kernels::{self, Blake2bKernelId, CompressFn},
};

/// Forced kernel selection for BLAKE2b.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Blake2bForce {
  /// Use the fastest kernel the CPU supports.
  #[default]
  Auto,
  /// Force the portable scalar kernel.
  Portable,
  /// Force the 256-bit AVX2 kernel (x86_64 only).
  Avx2,
}

impl Blake2bForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Avx2 => "avx2",
    }
  }

  /// Parse an override value. Accepts a few aliases, case-insensitively.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("avx2") || value.eq_ignore_ascii_case("simd") || value.eq_ignore_ascii_case("vector")
    {
      return Some(Self::Avx2);
    }
    None
  }
}

/// Resolved BLAKE2b configuration.
///
/// Always names a kernel the running CPU can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blake2bConfig {
  requested_force: Blake2bForce,
  effective_force: Blake2bForce,
  kernel: Blake2bKernelId,
}

impl Blake2bConfig {
  /// Process default: environment override (if any) on top of auto selection.
  #[must_use]
  pub fn get() -> Self {
    Self::resolve(overrides(), platform::caps())
  }

  /// Explicit override, clamped to what the CPU supports.
  #[must_use]
  pub fn with_force(force: Blake2bForce) -> Self {
    Self::resolve(force, platform::caps())
  }

  /// Explicit override that must be honored exactly.
  ///
  /// # Errors
  ///
  /// [`Blake2bError::UnsupportedBackend`] if `force` names a kernel this CPU
  /// (or this build target) cannot run.
  pub fn try_with_force(force: Blake2bForce) -> Result<Self, Blake2bError> {
    let config = Self::with_force(force);
    if config.effective_force == force {
      Ok(config)
    } else {
      Err(Blake2bError::UnsupportedBackend)
    }
  }

  /// Configuration pinned to `kernel`. The caller checks `required_caps`.
  #[cfg(feature = "alloc")]
  #[must_use]
  pub(crate) const fn for_kernel(kernel: Blake2bKernelId) -> Self {
    let force = match kernel {
      Blake2bKernelId::Portable => Blake2bForce::Portable,
      #[cfg(target_arch = "x86_64")]
      Blake2bKernelId::X86Avx2 => Blake2bForce::Avx2,
    };
    Self {
      requested_force: force,
      effective_force: force,
      kernel,
    }
  }

  #[must_use]
  fn resolve(requested_force: Blake2bForce, caps: Caps) -> Self {
    let effective_force = clamp_force_to_caps(requested_force, caps);
    Self {
      requested_force,
      effective_force,
      kernel: kernel_for(effective_force, caps),
    }
  }

  /// Force mode as requested (env/programmatic).
  #[inline]
  #[must_use]
  pub const fn requested_force(&self) -> Blake2bForce {
    self.requested_force
  }

  /// Force mode after clamping to detected CPU capabilities.
  #[inline]
  #[must_use]
  pub const fn effective_force(&self) -> Blake2bForce {
    self.effective_force
  }

  /// Kernel this configuration dispatches to.
  #[inline]
  #[must_use]
  pub const fn kernel(&self) -> Blake2bKernelId {
    self.kernel
  }

  #[inline]
  #[must_use]
  pub(crate) fn compress_fn(&self) -> CompressFn {
    kernels::compress_fn(self.kernel)
  }
}

impl Default for Blake2bConfig {
  #[inline]
  fn default() -> Self {
    Self::get()
  }
}

#[cfg(feature = "std")]
fn read_env_override() -> Blake2bForce {
  std::env::var("RSCRYPTO_BLAKE2B_FORCE")
    .ok()
    .and_then(|v| Blake2bForce::parse(&v))
    .unwrap_or_default()
}

#[cfg(feature = "std")]
fn overrides() -> Blake2bForce {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Blake2bForce> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_override)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Blake2bForce {
  Blake2bForce::Auto
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64
fn clamp_force_to_caps(requested: Blake2bForce, caps: Caps) -> Blake2bForce {
  match requested {
    Blake2bForce::Auto | Blake2bForce::Portable => requested,
    Blake2bForce::Avx2 => {
      #[cfg(target_arch = "x86_64")]
      {
        if Blake2bKernelId::X86Avx2.is_supported_by(caps) {
          return Blake2bForce::Avx2;
        }
      }
      Blake2bForce::Auto
    }
  }
}

#[inline]
#[must_use]
#[allow(unused_variables)] // `caps` only used on x86_64
fn kernel_for(force: Blake2bForce, caps: Caps) -> Blake2bKernelId {
  match force {
    Blake2bForce::Portable => Blake2bKernelId::Portable,
    Blake2bForce::Auto | Blake2bForce::Avx2 => {
      #[cfg(target_arch = "x86_64")]
      {
        if Blake2bKernelId::X86Avx2.is_supported_by(caps) {
          return Blake2bKernelId::X86Avx2;
        }
      }
      Blake2bKernelId::Portable
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_aliases() {
    assert_eq!(Blake2bForce::parse(" AUTO "), Some(Blake2bForce::Auto));
    assert_eq!(Blake2bForce::parse("scalar"), Some(Blake2bForce::Portable));
    assert_eq!(Blake2bForce::parse("Vector"), Some(Blake2bForce::Avx2));
    assert_eq!(Blake2bForce::parse("neon"), None);
    assert_eq!(Blake2bForce::parse(""), None);
  }

  #[test]
  fn portable_force_is_always_honored() {
    let config = Blake2bConfig::with_force(Blake2bForce::Portable);
    assert_eq!(config.kernel(), Blake2bKernelId::Portable);
    assert_eq!(
      Blake2bConfig::try_with_force(Blake2bForce::Portable),
      Ok(config)
    );
  }

  #[test]
  fn avx2_force_without_caps_clamps_to_portable() {
    let config = Blake2bConfig::resolve(Blake2bForce::Avx2, Caps::NONE);
    assert_eq!(config.requested_force(), Blake2bForce::Avx2);
    assert_eq!(config.effective_force(), Blake2bForce::Auto);
    assert_eq!(config.kernel(), Blake2bKernelId::Portable);
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn auto_prefers_avx2_when_present() {
    let config = Blake2bConfig::resolve(Blake2bForce::Auto, platform::caps::x86::AVX2_READY);
    assert_eq!(config.kernel(), Blake2bKernelId::X86Avx2);
  }

  #[test]
  fn strict_avx2_matches_detection() {
    let supported = kernels::ALL
      .iter()
      .any(|&id| id != Blake2bKernelId::Portable && id.is_supported_by(platform::caps()));
    match Blake2bConfig::try_with_force(Blake2bForce::Avx2) {
      Ok(config) => {
        assert!(supported);
        assert_eq!(config.effective_force(), Blake2bForce::Avx2);
      }
      Err(err) => {
        assert!(!supported);
        assert_eq!(err, Blake2bError::UnsupportedBackend);
      }
    }
  }

  #[test]
  fn resolved_kernel_is_always_runnable() {
    for force in [Blake2bForce::Auto, Blake2bForce::Portable, Blake2bForce::Avx2] {
      let config = Blake2bConfig::with_force(force);
      assert!(config.kernel().is_supported_by(platform::caps()), "{force:?}");
    }
  }
}
