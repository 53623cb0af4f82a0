//! A module containing [`List`] and associated types.
//!
//! [`List`] is a growable contiguous collection that starts out without any allocation. It grows
//! through a [`RawAlloc`], which defaults to the [`Global`] allocator but can be replaced to
//! observe or restrict allocation. Borrowed iteration is provided by [`std::slice`] through
//! [`Deref<Target = [T]>`](std::ops::Deref), with [`IntoIter`] for owned iteration.

mod alloc;
mod error;
mod iter;
mod list;

pub use alloc::*;
pub use error::*;
pub use iter::*;
pub use list::*;
