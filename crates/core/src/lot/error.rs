//! Lot and payment error types.

use thiserror::Error;

/// Errors that can occur during lot and payment operations.
#[derive(Debug, Error)]
pub enum LotError {
    /// Lot title must not be empty.
    #[error("Lot title must not be empty")]
    EmptyTitle,

    /// Lot total price must be positive.
    #[error("Lot total price must be positive")]
    NonPositiveTotalPrice,

    /// Payment amount must be positive.
    #[error("Payment amount must be positive")]
    NonPositiveAmount,
}

impl LotError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "EMPTY_TITLE",
            Self::NonPositiveTotalPrice => "NON_POSITIVE_TOTAL_PRICE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        // All lot-level errors are input validation failures.
        400
    }

    /// Returns the input field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::NonPositiveTotalPrice => "total_price",
            Self::NonPositiveAmount => "amount",
        }
    }
}
