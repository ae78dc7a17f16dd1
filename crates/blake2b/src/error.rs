//! Error type for BLAKE2b argument validation.

use core::fmt;

/// Errors returned by the BLAKE2b APIs.
///
/// Every variant is an argument or state-machine violation detected before any
/// output is written; no partial digest is ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Blake2bError {
  /// Digest length outside `1..=64`, or an extended output length that does
  /// not fit in a `u32`.
  InvalidOutputLength,
  /// Key longer than 64 bytes.
  InvalidKeyLength,
  /// Destination buffer shorter than the digest length.
  BufferTooSmall,
  /// `update` or `finalize` called after `finalize`; only `reset` is valid.
  AlreadyFinalized,
  /// A kernel was explicitly requested that this CPU cannot run.
  UnsupportedBackend,
}

impl Blake2bError {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::InvalidOutputLength => "invalid output length",
      Self::InvalidKeyLength => "invalid key length",
      Self::BufferTooSmall => "output buffer too small",
      Self::AlreadyFinalized => "hasher already finalized",
      Self::UnsupportedBackend => "requested kernel not supported on this CPU",
    }
  }
}

impl fmt::Display for Blake2bError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl core::error::Error for Blake2bError {}
