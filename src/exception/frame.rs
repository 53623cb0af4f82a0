use super::{Outcome, Thrown};
use crate::status::{ErrorValue, StatusCode};

/// A recovery point for thrown values.
///
/// Arming a frame runs a scope. If anything inside the scope throws, no matter how deeply nested,
/// the value unwinds back to [`Frame::arm`], which returns the thrown [`StatusCode`] and keeps the
/// value itself until it is disposed of.
///
/// # Examples
/// ```
/// # use foundation::exception::{Frame, Outcome, Thrown};
/// # use foundation::status::StatusCode;
/// fn inner() -> Outcome<u8> {
///     Err(Thrown::here(StatusCode::AllocationFailure, "out of memory"))
/// }
///
/// fn outer() -> Outcome<u8> {
///     let value = inner()?;
///     Ok(value + 1)
/// }
///
/// let mut frame = Frame::new();
/// assert_eq!(frame.arm(outer), Err(StatusCode::AllocationFailure));
/// assert_eq!(frame.caught().map(|e| e.message()), Some("out of memory"));
///
/// frame.dispose();
/// assert!(frame.caught().is_none());
/// ```
#[derive(Debug, Default)]
pub struct Frame {
    caught: Option<Thrown>,
}

impl Frame {
    pub const fn new() -> Frame {
        Frame { caught: None }
    }

    /// Runs `body` with this frame as its recovery point. Returns the value produced by `body`, or
    /// the status of the value it threw. A thrown value replaces any value the frame was still
    /// holding.
    pub fn arm<T, F>(&mut self, body: F) -> Result<T, StatusCode>
    where
        F: FnOnce() -> Outcome<T>,
    {
        match body() {
            Ok(value) => Ok(value),
            Err(thrown) => {
                let status = thrown.status();
                self.caught = Some(thrown);
                Err(status)
            },
        }
    }

    /// Returns the most recently caught value, if it hasn't been disposed of.
    pub fn caught(&self) -> Option<&ErrorValue> {
        self.caught.as_deref()
    }

    pub const fn is_holding(&self) -> bool {
        self.caught.is_some()
    }

    /// Releases the caught value, returning it to the caller.
    pub fn dispose(&mut self) -> Option<ErrorValue> {
        self.caught.take().map(Thrown::into_error)
    }

    /// Throws the caught value again towards an outer frame. Does nothing if the frame isn't
    /// holding a value.
    pub fn rethrow(&mut self) -> Outcome<()> {
        match self.caught.take() {
            Some(thrown) => Err(thrown),
            None => Ok(()),
        }
    }
}
