//! Expense modeling and reference validation.
//!
//! Expenses are one tagged-variant type: each kind declares which entity
//! references it requires, instead of a loose bag of optional foreign keys.

pub mod error;
pub mod kind;

pub use error::ExpenseError;
pub use kind::{ExpenseKind, ExpenseType};
