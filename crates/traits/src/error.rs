//! Error types shared across hashing crates.
//!
//! Algorithm crates define their own argument-validation errors; this module
//! only carries the opaque verification failure.

use core::fmt;

/// Tag verification failed.
///
/// Returned when a computed keyed-hash tag does not match the expected one.
/// Carries no detail about where the mismatch occurred.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn check(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   // Real code: use constant-time comparison
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// assert!(check(&[0u8; 32], &[1u8; 32]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}
