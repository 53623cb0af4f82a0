//! The status and error model shared by the rest of the crate.
//!
//! Failures are described by a [`StatusCode`] and recorded as an [`ErrorValue`], carrying the
//! [`Origin`] of the failure and a message. A [`Context`] holds the handlers, verbosity threshold
//! and diagnostic sink used when a failure is reported.

mod code;
mod context;
mod error;
mod severity;
mod tests;

pub use code::*;
pub use context::*;
pub use error::*;
pub use severity::*;
