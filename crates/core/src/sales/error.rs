//! Sale error types.

use thiserror::Error;

/// Errors that can occur during sale operations.
#[derive(Debug, Error)]
pub enum SaleError {
    /// Quantity sold must be positive.
    #[error("Quantity sold must be positive")]
    NonPositiveQuantity,

    /// Sale price must be positive.
    #[error("Sale price must be positive")]
    NonPositivePrice,

    /// Unknown shipping status value.
    #[error("Invalid shipping status: {0}")]
    InvalidStatus(String),

    /// The sale has already been refunded; refunds happen exactly once.
    #[error("Sale has already been refunded")]
    AlreadyRefunded,
}

impl SaleError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::NonPositivePrice => "NON_POSITIVE_PRICE",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::AlreadyRefunded => "ALREADY_REFUNDED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveQuantity | Self::NonPositivePrice | Self::InvalidStatus(_) => 400,
            Self::AlreadyRefunded => 409,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SaleError::NonPositiveQuantity.error_code(), "NON_POSITIVE_QUANTITY");
        assert_eq!(
            SaleError::InvalidStatus("lost".into()).error_code(),
            "INVALID_STATUS"
        );
        assert_eq!(SaleError::AlreadyRefunded.error_code(), "ALREADY_REFUNDED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(SaleError::NonPositivePrice.http_status_code(), 400);
        assert_eq!(SaleError::AlreadyRefunded.http_status_code(), 409);
    }
}
