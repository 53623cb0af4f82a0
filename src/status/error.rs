use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::panic::Location;

use super::StatusCode;

/// An opaque source location token, recording where a failure was raised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl Origin {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Origin {
        Origin {
            file,
            line,
            function,
        }
    }

    /// Captures the location of the caller. Functions aren't visible through [`Location`], so the
    /// function name is left empty. Prefer [`origin!`](crate::origin) where the name matters.
    #[track_caller]
    pub fn caller() -> Origin {
        let location = Location::caller();
        Origin::new(location.file(), location.line(), "")
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl From<&'static Location<'static>> for Origin {
    fn from(value: &'static Location<'static>) -> Self {
        Origin::new(value.file(), value.line(), "")
    }
}

/// Expands to the [`Origin`](crate::status::Origin) of the invocation, including the path of the
/// enclosing function.
///
/// # Examples
/// ```
/// # use foundation::origin;
/// fn somewhere() -> foundation::status::Origin {
///     origin!()
/// }
/// let origin = somewhere();
/// assert!(origin.function.ends_with("somewhere"));
/// assert_eq!(origin.file, file!());
/// ```
#[macro_export]
macro_rules! origin {
    () => {
        $crate::status::Origin::new(::std::file!(), ::std::line!(), {
            fn marker() {}
            fn name_of<T>(_: T) -> &'static str {
                ::std::any::type_name::<T>()
            }
            let name = name_of(marker);
            name.strip_suffix("::marker").unwrap_or(name)
        })
    };
}

/// A recorded failure: a status, where it happened and a message.
///
/// Static messages are held by reference and never copied, while formatted messages are owned.
/// The default value is the cleared [`StatusCode::Ok`] state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub status: StatusCode,
    pub origin: Origin,
    pub message: Cow<'static, str>,
}

impl ErrorValue {
    pub fn new(
        status: StatusCode,
        message: impl Into<Cow<'static, str>>,
        origin: Origin,
    ) -> ErrorValue {
        ErrorValue {
            status,
            origin,
            message: message.into(),
        }
    }

    /// Creates a new ErrorValue originating from the caller's location.
    #[track_caller]
    pub fn here(status: StatusCode, message: impl Into<Cow<'static, str>>) -> ErrorValue {
        ErrorValue::new(status, message, Origin::caller())
    }

    /// Returns the message attached to this value.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_ok(&self) -> bool {
        !self.status.is_failure()
    }

    /// Resets self to the zero state.
    pub fn clear(&mut self) {
        *self = ErrorValue::default();
    }
}

impl Display for ErrorValue {
    /// Formats the value as a single diagnostic line: `<file>:<line>: <status-name>: <message>`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.origin.file, self.origin.line, self.status, self.message
        )
    }
}

impl Error for ErrorValue {}
