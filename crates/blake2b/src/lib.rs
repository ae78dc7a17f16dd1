//! BLAKE2b (RFC 7693) with runtime-dispatched compression kernels.
//!
//! Sequential, single-node BLAKE2b: keyed or unkeyed, 1 to 64 byte digests,
//! plus an extendable-output construction for longer outputs.
//!
//! # Entry Points
//!
//! | API | Purpose |
//! |-----|---------|
//! | [`compute_hash`] / [`hash`] | One-shot unkeyed digest |
//! | [`Blake2bHasher`] | Streaming, optionally keyed (`update` / `finalize` / `reset`) |
//! | [`Blake2b512`] | Fixed 64-byte hasher implementing [`Digest`] |
//! | [`hash_long`] | Outputs of any `u32` length by chained rehashing |
//! | [`Blake2bBackend`] | Contract for interchangeable backends ([`CoreBackend`]) |
//!
//! # Kernels
//!
//! | Kernel | Requires |
//! |--------|----------|
//! | `portable` | nothing |
//! | `x86_64/avx2` | AVX + AVX2 |
//!
//! Both produce identical digests. The fastest supported kernel is chosen at
//! runtime; [`Blake2bConfig`] pins one explicitly, and the
//! `RSCRYPTO_BLAKE2B_FORCE` environment variable (`auto`, `portable`, `avx2`)
//! changes the process default.
//!
//! # Example
//!
//! ```rust
//! use blake2b::{Blake2bHasher, hash};
//!
//! let digest = hash(b"abc", 64)?;
//! assert_eq!(&digest.as_bytes()[..4], &[0xba, 0x80, 0xa5, 0x3f]);
//!
//! let mut hasher = Blake2bHasher::new(64)?;
//! hasher.update(b"a")?;
//! hasher.update(b"bc")?;
//! assert_eq!(hasher.finalize_digest()?, digest);
//! # Ok::<(), blake2b::Blake2bError>(())
//! ```
//!
//! # no_std Support
//!
//! Disable the `std` feature for embedded use. `alloc` enables
//! [`hash_long_vec`].
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod config;
pub mod constants;
pub mod dispatch;
mod error;
mod hasher;
#[cfg(feature = "alloc")]
mod kernel_test;
pub mod kernels;
mod long;
mod oneshot;
mod output;
pub mod params;
mod portable;
mod util;
#[cfg(target_arch = "x86_64")]
mod x86_64;

#[doc(hidden)]
#[cfg(feature = "alloc")]
pub mod __internal {
  pub use crate::kernel_test::{KernelResult, run_all_blake2b_kernels, verify_blake2b_kernels};
}

pub use backend::{Blake2bBackend, CoreBackend, hash_with_backend};
pub use config::{Blake2bConfig, Blake2bForce};
pub use dispatch::{DispatchInfo, kernel_name};
pub use error::Blake2bError;
pub use hasher::{Blake2b512, Blake2bHasher};
pub use kernels::Blake2bKernelId;
#[cfg(feature = "alloc")]
pub use long::hash_long_vec;
pub use long::{hash_long, hash_long_with};
pub use oneshot::{compute_hash, compute_hash_with, hash, hash_with};
pub use output::Blake2bDigest;
pub use traits::{Digest, VerificationError};
