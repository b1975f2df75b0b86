//! Inventory error types.

use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Product name must not be empty.
    #[error("Product name must not be empty")]
    EmptyName,

    /// Product price must be positive.
    #[error("Product price must be positive")]
    NonPositivePrice,

    /// Requested quantity exceeds what is currently available.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Units currently available.
        available: u32,
        /// Units the caller asked for.
        requested: u32,
    },

    /// Unknown value for a classification field.
    #[error("Unknown value for {field}: {value}")]
    UnknownChoice {
        /// The classification field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl InventoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::NonPositivePrice => "NON_POSITIVE_PRICE",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::UnknownChoice { .. } => "UNKNOWN_CHOICE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyName | Self::NonPositivePrice | Self::UnknownChoice { .. } => 400,
            Self::InsufficientStock { .. } => 422,
        }
    }

    /// Returns the input field this error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyName => Some("name"),
            Self::NonPositivePrice => Some("price"),
            Self::InsufficientStock { .. } => Some("quantity"),
            Self::UnknownChoice { field, .. } => Some(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(InventoryError::EmptyName.error_code(), "EMPTY_NAME");
        assert_eq!(
            InventoryError::InsufficientStock {
                available: 2,
                requested: 5,
            }
            .error_code(),
            "INSUFFICIENT_STOCK"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(InventoryError::NonPositivePrice.http_status_code(), 400);
        assert_eq!(
            InventoryError::InsufficientStock {
                available: 0,
                requested: 1,
            }
            .http_status_code(),
            422
        );
    }

    #[test]
    fn test_insufficient_stock_display_carries_quantities() {
        let err = InventoryError::InsufficientStock {
            available: 3,
            requested: 7,
        };
        assert_eq!(err.to_string(), "Insufficient stock: requested 7, available 3");
    }
}
