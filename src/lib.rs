//! This crate is the substrate my other utility libraries were built on, consolidated into one
//! place.
//!
//! # Purpose
//! Over time I ended up writing the same few primitives four times over, in four slightly different
//! utility libraries. This crate keeps one copy of each: a growable list, an intrusive circular
//! linked list, a status and error model, structured unwinding to a recovery point and a content
//! hash.
//!
//! # Components
//! - [`status`]: [`StatusCode`](status::StatusCode)s, [`ErrorValue`](status::ErrorValue)s and the
//!   [`Context`](status::Context) which decides how failures are reported.
//! - [`exception`]: throwing an [`ErrorValue`](status::ErrorValue) through several calls to an
//!   armed [`Frame`](exception::Frame), plus overflow checked size arithmetic.
//! - [`collections`]: [`List`](collections::contiguous::List) and
//!   [`Links`](collections::linked::Links).
//! - [`hash`]: 64-bit FNV-1a.
//!
//! # Error Handling
//! Failures come in three kinds:
//! - Value failures, such as running out of memory, are returned as a
//!   [`Thrown`](exception::Thrown) value from `try_*` methods. Most collection methods have a
//!   non-`try` counterpart which panics instead, because nobody wants to handle a possible
//!   allocation failure every time they push an element.
//! - Contract violations, like an out of bounds index, are programmer error. The collections panic
//!   on them, and [`Context::assert`](status::Context::assert) aborts outright.
//! - Thrown values that nothing catches are escalated through the
//!   [`Context`](status::Context), which prints them and aborts.
//!
//! There are no statics involved: handlers and verbosity live in a
//! [`Context`](status::Context) that is passed to whatever needs it.
//!
//! # Dependencies
//! This crate uses `std`, and some derive macros from `derive_more` because they remove the need
//! for some very repetitive programming. It doesn't use [`Vec`] to write
//! [`List`](collections::contiguous::List) or anything.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
pub mod exception;
#[cfg(feature = "hash")]
pub mod hash;
pub mod status;

pub(crate) mod util;
