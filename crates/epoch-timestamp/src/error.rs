//! Error types for epoch-timestamp operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// A numeric amount that is not finite, or whose instant cannot be
    /// represented in i64 seconds.
    #[error("Invalid magnitude: {0}")]
    InvalidMagnitude(String),

    /// A structured mapping was required but something else was supplied.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}

impl TimestampError {
    pub(crate) fn not_finite(what: &str) -> Self {
        TimestampError::InvalidMagnitude(format!("The {what} must be a finite number"))
    }

    pub(crate) fn out_of_range(what: &str) -> Self {
        TimestampError::InvalidMagnitude(format!("The {what} is out of the representable range"))
    }
}

pub type Result<T> = std::result::Result<T, TimestampError>;
