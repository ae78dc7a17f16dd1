//! Kernel registry: ids, required capabilities, and function pointers.

use platform::Caps;

use crate::constants::BLOCK_LEN;

/// Compress one block: `(state, block, byte counter after this block, is_last)`.
pub type CompressFn = fn(&mut [u64; 8], &[u8; BLOCK_LEN], u64, bool);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Blake2bKernelId {
  Portable = 0,
  #[cfg(target_arch = "x86_64")]
  X86Avx2 = 1,
}

/// Every kernel compiled into this build, fastest last.
#[cfg(target_arch = "x86_64")]
pub const ALL: &[Blake2bKernelId] = &[Blake2bKernelId::Portable, Blake2bKernelId::X86Avx2];
#[cfg(not(target_arch = "x86_64"))]
pub const ALL: &[Blake2bKernelId] = &[Blake2bKernelId::Portable];

impl Blake2bKernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      #[cfg(target_arch = "x86_64")]
      Self::X86Avx2 => "x86_64/avx2",
    }
  }

  /// Whether this kernel can run on a CPU with `caps`.
  #[inline]
  #[must_use]
  pub const fn is_supported_by(self, caps: Caps) -> bool {
    caps.has(required_caps(self))
  }
}

#[must_use]
pub fn id_from_name(name: &str) -> Option<Blake2bKernelId> {
  match name {
    "portable" => Some(Blake2bKernelId::Portable),
    #[cfg(target_arch = "x86_64")]
    "x86_64/avx2" => Some(Blake2bKernelId::X86Avx2),
    _ => None,
  }
}

/// Function pointer for a kernel.
///
/// Callers must only pass ids for which `required_caps(id)` is satisfied by
/// `platform::caps()`; [`crate::config::Blake2bConfig`] resolution guarantees this.
#[inline]
#[must_use]
pub(crate) fn compress_fn(id: Blake2bKernelId) -> CompressFn {
  match id {
    Blake2bKernelId::Portable => crate::portable::compress,
    #[cfg(target_arch = "x86_64")]
    Blake2bKernelId::X86Avx2 => crate::x86_64::avx2::compress,
  }
}

#[inline]
#[must_use]
pub const fn required_caps(id: Blake2bKernelId) -> Caps {
  match id {
    Blake2bKernelId::Portable => Caps::NONE,
    #[cfg(target_arch = "x86_64")]
    Blake2bKernelId::X86Avx2 => platform::caps::x86::AVX2_READY,
  }
}
