//! Structured unwinding for failures that need to escape several calls at once.
//!
//! A failure is thrown as a [`Thrown`] value inside an [`Outcome`] and propagates with `?` until it
//! reaches an armed [`Frame`]. With no frame to catch it, [`Context::escalate`] reports the value
//! and terminates the process.
//!
//! [`Context::escalate`]: crate::status::Context::escalate

mod checked;
mod frame;
mod tests;
mod thrown;

pub use checked::*;
pub use frame::*;
pub use thrown::*;
