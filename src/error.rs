//! Error type shared by the calculator and the console session.

use std::fmt;

/// Errors that can occur while estimating airtime and capacity.
#[derive(Debug, Clone, PartialEq)]
pub enum CapacityError {
    /// A numeric input is outside the domain of the formulas.
    InvalidParameter {
        /// Parameter name as it appears in the API.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Console text could not be parsed as the expected numeric type.
    MalformedInput {
        /// Field being prompted for.
        field: &'static str,
        /// The offending text (trimmed).
        input: String,
    },
    /// Input stream ended before all fields were read.
    InputClosed,
    /// Reading from or writing to the console failed.
    Io(String),
}

impl CapacityError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter {}: {}", name, reason)
            }
            Self::MalformedInput { field, input } => {
                write!(f, "malformed input for {}: {:?}", field, input)
            }
            Self::InputClosed => write!(f, "input closed before all values were read"),
            Self::Io(msg) => write!(f, "console I/O error: {}", msg),
        }
    }
}

impl std::error::Error for CapacityError {}

impl From<std::io::Error> for CapacityError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
