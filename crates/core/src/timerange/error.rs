//! Date-range error types.

use thiserror::Error;

/// Errors that can occur while resolving a date range.
#[derive(Debug, Error)]
pub enum RangeError {
    /// A supplied date was not a valid `YYYY-MM-DD` value.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The explicit start date is after the end date.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// The supplied start date.
        start: String,
        /// The supplied end date.
        end: String,
    },

    /// Calendar arithmetic produced an impossible date.
    #[error("Internal date error: {0}")]
    Internal(String),
}

impl RangeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "INVALID_DATE",
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDate(_) | Self::InvalidRange { .. } => 400,
            Self::Internal(_) => 500,
        }
    }
}
