//! Product stock reconciliation rules.
//!
//! This module implements the inventory half of the ledger:
//! - Informational product classification enums
//! - Availability reconciliation (sales decrement, refunds/restocks restore)
//! - Validation for product creation and stock edits
//! - Error types for inventory operations

pub mod error;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod reconciler_props;

pub use error::InventoryError;
pub use reconciler::StockReconciler;
pub use types::{Category, CosmeticCondition, SubCategory, WorkingCondition};
