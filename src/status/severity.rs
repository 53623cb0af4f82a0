use std::fmt::{self, Formatter};
use std::str::FromStr;

use derive_more::{Display, Error};

/// An ordered severity level. Lower levels are more severe, so a message with severity `s` passes a
/// verbosity threshold `v` when `s <= v`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fatal,
    Error,
    #[default]
    Warning,
    Info,
    Debug,
}

impl Severity {
    /// Returns true if a message at this severity should be emitted under `threshold`.
    pub fn passes(self, threshold: Severity) -> bool {
        self <= threshold
    }

    pub const fn name(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display("Unknown severity level {level:?}!")]
pub struct UnknownSeverity {
    pub level: String,
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    /// Parses a severity by name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(UnknownSeverity {
                level: s.to_owned(),
            }),
        }
    }
}
