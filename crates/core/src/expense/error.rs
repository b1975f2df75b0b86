//! Expense error types.

use thiserror::Error;

/// Errors that can occur during expense operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Unknown expense type value.
    #[error("Invalid expense type: {0}")]
    InvalidExpenseType(String),

    /// A reference required by the expense type is missing.
    #[error("Expense type {expense_type} requires a {field} reference")]
    MissingReference {
        /// The expense type that was requested.
        expense_type: &'static str,
        /// The missing reference field.
        field: &'static str,
    },

    /// Expense amount must be positive.
    #[error("Expense amount must be positive")]
    NonPositiveAmount,
}

impl ExpenseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidExpenseType(_) => "INVALID_EXPENSE_TYPE",
            Self::MissingReference { .. } => "MISSING_REFERENCE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        // All expense-level errors are input validation failures.
        400
    }
}
