//! Core hashing traits for the BLAKE2b workspace.
//!
//! This crate is `no_std` compatible and has zero dependencies.
//!
//! # Traits
//!
//! | Trait | Purpose | Implementors |
//! |-------|---------|--------------|
//! | [`Digest`] | Fixed-size cryptographic digests | `blake2b::Blake2b512` |
//!
//! # Error Types
//!
//! - [`VerificationError`] - Opaque error for keyed-hash tag verification
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;

pub use digest::Digest;
pub use error::VerificationError;
