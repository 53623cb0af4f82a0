//! Content hashing with 64-bit FNV-1a.
//!
//! [`hash`] turns an arbitrary byte sequence into a 64-bit key that only depends on the bytes
//! themselves, so it is identical across runs and platforms. [`FnvHasher`] exposes the same
//! function through [`std::hash::Hasher`], for use with [`Hash`](std::hash::Hash) types.

mod fnv;

pub use fnv::*;
