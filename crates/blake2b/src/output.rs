//! Variable-length digest value.

#![allow(clippy::indexing_slicing)] // `len` is always <= OUT_LEN_MAX

use core::fmt;

use crate::{Blake2bError, constants::OUT_LEN_MAX};

/// A BLAKE2b digest of 1 to 64 bytes.
///
/// Stored inline; `as_bytes()` yields exactly the requested length.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blake2bDigest {
  bytes: [u8; OUT_LEN_MAX],
  len: u8,
}

impl Blake2bDigest {
  /// `bytes[len..]` must be zero so equality ignores the unused tail.
  #[inline]
  pub(crate) const fn new(bytes: [u8; OUT_LEN_MAX], len: u8) -> Self {
    Self { bytes, len }
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..usize::from(self.len)]
  }

  #[inline]
  #[must_use]
  #[allow(clippy::len_without_is_empty)] // never empty
  pub const fn len(&self) -> usize {
    self.len as usize
  }

  /// The full 64-byte buffer; bytes past `len()` are zero.
  #[inline]
  #[must_use]
  pub const fn as_array(&self) -> &[u8; OUT_LEN_MAX] {
    &self.bytes
  }
}

/// Wrap digest bytes produced elsewhere, such as by another backend.
impl TryFrom<&[u8]> for Blake2bDigest {
  type Error = Blake2bError;

  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    let len = crate::params::checked_out_len(value.len())?;
    let mut bytes = [0u8; OUT_LEN_MAX];
    bytes[..value.len()].copy_from_slice(value);
    Ok(Self::new(bytes, len))
  }
}

impl AsRef<[u8]> for Blake2bDigest {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl fmt::LowerHex for Blake2bDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Blake2bDigest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Blake2bDigest({self:x})")
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::format;

  use super::*;

  #[test]
  fn as_bytes_respects_length() {
    let mut bytes = [0u8; OUT_LEN_MAX];
    bytes[..3].copy_from_slice(&[0xab, 0x01, 0xff]);
    let d = Blake2bDigest::new(bytes, 3);
    assert_eq!(d.as_bytes(), &[0xab, 0x01, 0xff]);
    assert_eq!(d.len(), 3);
    assert_eq!(format!("{d:x}"), "ab01ff");
    assert_eq!(format!("{d:?}"), "Blake2bDigest(ab01ff)");
    assert_eq!(Blake2bDigest::try_from(&[0xab, 0x01, 0xff][..]), Ok(d));
  }

  #[test]
  fn try_from_rejects_bad_lengths() {
    assert_eq!(Blake2bDigest::try_from(&[][..]), Err(Blake2bError::InvalidOutputLength));
    assert_eq!(
      Blake2bDigest::try_from(&[0u8; 65][..]),
      Err(Blake2bError::InvalidOutputLength)
    );
  }
}
