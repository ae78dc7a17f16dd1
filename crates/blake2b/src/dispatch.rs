//! Process-default kernel dispatch and introspection.

use core::fmt;

use crate::{config::Blake2bConfig, constants::BLOCK_LEN};

/// Configuration used when the caller does not pass one.
#[inline]
#[must_use]
pub fn active() -> Blake2bConfig {
  Blake2bConfig::get()
}

/// Name of the kernel the process default dispatches to.
#[inline]
#[must_use]
pub fn kernel_name() -> &'static str {
  active().kernel().as_str()
}

/// Compress one block with the process-default kernel.
///
/// Low-level entry point for alternate drivers; most callers want
/// [`crate::Blake2bHasher`] or [`crate::compute_hash`].
#[inline]
pub fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_LEN], t: u64, is_last: bool) {
  (active().compress_fn())(h, block, t, is_last);
}

/// Snapshot of the dispatch decision, for logs and bug reports.
#[derive(Clone, Copy, Debug)]
pub struct DispatchInfo {
  pub config: Blake2bConfig,
  pub platform: platform::Description,
}

/// Describe the process-default dispatch decision.
#[must_use]
pub fn info() -> DispatchInfo {
  DispatchInfo {
    config: active(),
    platform: platform::describe(),
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "blake2b kernel={} force={} (requested {}) platform={}",
      self.config.kernel().as_str(),
      self.config.effective_force().as_str(),
      self.config.requested_force().as_str(),
      self.platform
    )
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::ToString;

  use super::*;
  use crate::kernels::id_from_name;

  #[test]
  fn kernel_name_is_registered() {
    assert!(id_from_name(kernel_name()).is_some());
  }

  #[test]
  fn info_mentions_kernel_and_platform() {
    let text = info().to_string();
    assert!(text.contains(kernel_name()), "{text}");
    assert!(text.contains(platform::arch().as_str()), "{text}");
  }

  #[test]
  fn default_compress_matches_portable() {
    let block = [7u8; BLOCK_LEN];
    let mut a = crate::params::ParamBlock::new(64, 0).chaining_state();
    let mut b = a;
    compress(&mut a, &block, 128, true);
    crate::portable::compress(&mut b, &block, 128, true);
    assert_eq!(a, b);
  }
}
