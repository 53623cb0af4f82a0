//! General-purpose collection types.
//!
//! # Purpose
//! These are the two containers everything else in the crate family is built from: a growable
//! contiguous [`List`](contiguous::List), and an arena of intrusively linked records,
//! [`Links`](linked::Links).
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing some of the more repetitive functionality.

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "linked")]
pub mod linked;
