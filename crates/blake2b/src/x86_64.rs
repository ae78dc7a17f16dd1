//! BLAKE2b x86_64 SIMD kernels.
//!
//! # Safety
//!
//! The `unsafe` entry points here require the named CPU features. Safe
//! wrappers are only handed out by [`crate::kernels::compress_fn`] for kernel
//! ids whose `required_caps` were checked against the running CPU.

pub(crate) mod avx2;
