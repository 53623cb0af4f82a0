use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use crate::status::{Context, ErrorValue, StatusCode};

/// The result of an operation which can throw.
pub type Outcome<T> = Result<T, Thrown>;

/// A thrown [`ErrorValue`]. The value is moved onto the heap when thrown so that unwinding through
/// many frames only ever moves a pointer.
///
/// Thrown values propagate with `?` until they reach an armed [`Frame`](super::Frame) or are
/// escalated with [`Context::escalate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown(Box<ErrorValue>);

impl Thrown {
    pub fn new(error: ErrorValue) -> Thrown {
        Thrown(Box::new(error))
    }

    /// Creates a Thrown value originating from the caller's location.
    #[track_caller]
    pub fn here(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Thrown {
        Thrown::new(ErrorValue::here(status, message))
    }

    /// The discriminant used to tell exceptions apart when they are caught.
    pub fn status(&self) -> StatusCode {
        self.0.status
    }

    pub fn error(&self) -> &ErrorValue {
        &self.0
    }

    pub fn into_error(self) -> ErrorValue {
        *self.0
    }
}

impl Deref for Thrown {
    type Target = ErrorValue;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ErrorValue> for Thrown {
    fn from(value: ErrorValue) -> Self {
        Thrown::new(value)
    }
}

impl Display for Thrown {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&*self.0, f)
    }
}

impl Error for Thrown {}

/// Throws `error`, for use in a function returning an [`Outcome`].
///
/// # Examples
/// ```
/// # use foundation::exception::{throw, Outcome};
/// # use foundation::status::{ErrorValue, StatusCode};
/// fn halve(value: u32) -> Outcome<u32> {
///     if value % 2 != 0 {
///         return throw(ErrorValue::here(StatusCode::GenericError, "odd value"));
///     }
///     Ok(value / 2)
/// }
/// assert_eq!(halve(4), Ok(2));
/// assert_eq!(halve(3).unwrap_err().status(), StatusCode::GenericError);
/// ```
pub fn throw<T>(error: ErrorValue) -> Outcome<T> {
    Err(Thrown::new(error))
}

/// Throws if `code` isn't [`StatusCode::Ok`], allowing a status returned by a non-throwing API to
/// join an unwind.
#[track_caller]
pub fn try_status(code: StatusCode, message: impl Into<Cow<'static, str>>) -> Outcome<()> {
    match code {
        StatusCode::Ok => Ok(()),
        code => Err(Thrown::here(code, message)),
    }
}

impl Context {
    /// Handles a value that was thrown without any armed frame to catch it. The value is written
    /// to the sink and the process is aborted.
    pub fn escalate(&self, thrown: Thrown) -> ! {
        self.fatal(&thrown)
    }
}

pub trait OutcomeExtension<T> {
    /// Unwraps the value, escalating a thrown value through `ctx` as if no frame was armed.
    fn or_escalate(self, ctx: &Context) -> T;

    /// Returns the status of this outcome, [`StatusCode::Ok`] for success.
    fn status(&self) -> StatusCode;
}

impl<T> OutcomeExtension<T> for Outcome<T> {
    fn or_escalate(self, ctx: &Context) -> T {
        match self {
            Ok(value) => value,
            Err(thrown) => ctx.escalate(thrown),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Ok(_) => StatusCode::Ok,
            Err(thrown) => thrown.status(),
        }
    }
}
