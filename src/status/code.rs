use std::fmt::{self, Display, Formatter};

use derive_more::IsVariant;

use super::Severity;

/// The name returned for any raw status value outside of the enumerated range.
pub const UNKNOWN_STATUS: &str = "Unknown Status";

/// The closed set of outcome categories. Every variant other than [`StatusCode::Ok`] represents a
/// failure.
///
/// The discriminants are stable, so that a raw integer can be translated back with
/// [`StatusCode::from_raw`].
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum StatusCode {
    #[default]
    Ok = 0,
    GenericError = 1,
    FatalError = 2,
    AssertionFailure = 3,
    PreconditionFailure = 4,
    TestFailure = 5,
    ArithmeticOverflow = 6,
    AllocationFailure = 7,
}

impl StatusCode {
    /// The number of enumerated status codes, used to size per-code tables.
    pub const COUNT: usize = 8;

    /// Every status code, ordered by discriminant.
    pub const ALL: [StatusCode; StatusCode::COUNT] = [
        StatusCode::Ok,
        StatusCode::GenericError,
        StatusCode::FatalError,
        StatusCode::AssertionFailure,
        StatusCode::PreconditionFailure,
        StatusCode::TestFailure,
        StatusCode::ArithmeticOverflow,
        StatusCode::AllocationFailure,
    ];

    /// Translates a raw integer into a StatusCode, returning [`None`] for anything outside of the
    /// enumerated range.
    ///
    /// # Examples
    /// ```
    /// # use foundation::status::StatusCode;
    /// assert_eq!(StatusCode::from_raw(6), Some(StatusCode::ArithmeticOverflow));
    /// assert_eq!(StatusCode::from_raw(-1), None);
    /// ```
    pub const fn from_raw(raw: i64) -> Option<StatusCode> {
        if raw < 0 || raw >= StatusCode::COUNT as i64 {
            None
        } else {
            Some(StatusCode::ALL[raw as usize])
        }
    }

    /// Returns the raw discriminant of this code.
    pub const fn raw(self) -> i64 {
        self as i64
    }

    /// Returns the human-readable name of this code.
    pub const fn name(self) -> &'static str {
        match self {
            StatusCode::Ok => "Ok",
            StatusCode::GenericError => "Generic Error",
            StatusCode::FatalError => "Fatal Error",
            StatusCode::AssertionFailure => "Assertion Failure",
            StatusCode::PreconditionFailure => "Precondition Failure",
            StatusCode::TestFailure => "Test Failure",
            StatusCode::ArithmeticOverflow => "Arithmetic Overflow",
            StatusCode::AllocationFailure => "Allocation Failure",
        }
    }

    /// Returns true for every code except [`StatusCode::Ok`].
    pub const fn is_failure(self) -> bool {
        !matches!(self, StatusCode::Ok)
    }

    /// Contract violations indicate programmer error and are never recovered from.
    pub const fn is_contract_violation(self) -> bool {
        matches!(self, StatusCode::AssertionFailure | StatusCode::PreconditionFailure)
    }

    /// The severity at which a failure with this code is reported.
    pub const fn severity(self) -> Severity {
        match self {
            StatusCode::Ok => Severity::Info,
            StatusCode::FatalError
            | StatusCode::AssertionFailure
            | StatusCode::PreconditionFailure => Severity::Fatal,
            StatusCode::GenericError
            | StatusCode::TestFailure
            | StatusCode::ArithmeticOverflow
            | StatusCode::AllocationFailure => Severity::Error,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns the name of the status with the provided raw value. This is a total function: any value
/// outside of the enumerated range produces [`UNKNOWN_STATUS`].
///
/// # Examples
/// ```
/// # use foundation::status::status_name;
/// assert_eq!(status_name(7), "Allocation Failure");
/// assert_eq!(status_name(i64::MAX), "Unknown Status");
/// ```
pub const fn status_name(raw: i64) -> &'static str {
    match StatusCode::from_raw(raw) {
        Some(code) => code.name(),
        None => UNKNOWN_STATUS,
    }
}
