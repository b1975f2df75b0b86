//! Availability reconciliation rules.
//!
//! Every sale, refund, restock, and stock edit flows through these
//! functions so the invariant `0 <= available_quantity` holds everywhere.
//! The decrement check is a pre-condition: callers must reject a sale
//! before mutating anything, and the storage layer enforces the same
//! guard again with a conditional update.

use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::{Category, CosmeticCondition, SubCategory, WorkingCondition};

/// Pure reconciliation logic for product availability.
///
/// This service contains no database access; the repository layer applies
/// the computed deltas inside its own transactions.
pub struct StockReconciler;

impl StockReconciler {
    /// Checks that `requested` units can be taken from `available`.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::InsufficientStock` carrying the actual
    /// available quantity when the decrement would go negative.
    pub const fn check_decrement(available: u32, requested: u32) -> Result<(), InventoryError> {
        if requested > available {
            return Err(InventoryError::InsufficientStock {
                available,
                requested,
            });
        }
        Ok(())
    }

    /// Applies a signed delta to an availability count, clamped at zero.
    ///
    /// Positive deltas are restocks or refund restores; negative deltas come
    /// from stock edits. Sale decrements never go through the clamp - they
    /// use [`Self::check_decrement`] first and fail instead of clamping.
    #[must_use]
    pub fn apply_delta(available: u32, delta: i64) -> u32 {
        let next = i64::from(available) + delta;
        u32::try_from(next.max(0)).unwrap_or(0)
    }

    /// Delta to apply to availability when a product's declared stock changes.
    ///
    /// Editing stock from 10 to 12 frees 2 more units; editing from 10 to 7
    /// removes 3, floored at zero by [`Self::apply_delta`].
    #[must_use]
    pub fn stock_edit_delta(old_stock: u32, new_stock: u32) -> i64 {
        i64::from(new_stock) - i64::from(old_stock)
    }

    /// Validates product creation input.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or the price is not
    /// strictly positive.
    pub fn validate_product(name: &str, price: Decimal) -> Result<(), InventoryError> {
        if name.trim().is_empty() {
            return Err(InventoryError::EmptyName);
        }
        if price <= Decimal::ZERO {
            return Err(InventoryError::NonPositivePrice);
        }
        Ok(())
    }

    /// Validates the classification labels a product carries.
    ///
    /// Absent labels pass; present ones must parse against the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::UnknownChoice` naming the offending field.
    pub fn validate_labels(
        category: Option<&str>,
        sub_category: Option<&str>,
        cosmetic_condition: Option<&str>,
        working_condition: Option<&str>,
    ) -> Result<(), InventoryError> {
        if let Some(value) = category {
            Category::parse(value)?;
        }
        if let Some(value) = sub_category {
            SubCategory::parse(value)?;
        }
        if let Some(value) = cosmetic_condition {
            CosmeticCondition::parse(value)?;
        }
        if let Some(value) = working_condition {
            WorkingCondition::parse(value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_check_decrement_exact_boundary() {
        // quantity == available succeeds and would drive availability to 0
        assert!(StockReconciler::check_decrement(5, 5).is_ok());
    }

    #[test]
    fn test_check_decrement_one_over_fails() {
        let err = StockReconciler::check_decrement(5, 6).unwrap_err();
        match err {
            InventoryError::InsufficientStock {
                available,
                requested,
            } => {
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_decrement_zero_available() {
        assert!(StockReconciler::check_decrement(0, 0).is_ok());
        assert!(StockReconciler::check_decrement(0, 1).is_err());
    }

    #[test]
    fn test_apply_delta_restock() {
        assert_eq!(StockReconciler::apply_delta(7, 3), 10);
    }

    #[test]
    fn test_apply_delta_floors_at_zero() {
        assert_eq!(StockReconciler::apply_delta(2, -5), 0);
    }

    #[test]
    fn test_stock_edit_delta() {
        assert_eq!(StockReconciler::stock_edit_delta(10, 12), 2);
        assert_eq!(StockReconciler::stock_edit_delta(10, 7), -3);
        assert_eq!(StockReconciler::stock_edit_delta(4, 4), 0);
    }

    #[test]
    fn test_validate_product() {
        assert!(StockReconciler::validate_product("Nikon FM2", dec!(450.00)).is_ok());
        assert!(matches!(
            StockReconciler::validate_product("  ", dec!(450.00)),
            Err(InventoryError::EmptyName)
        ));
        assert!(matches!(
            StockReconciler::validate_product("Nikon FM2", dec!(0)),
            Err(InventoryError::NonPositivePrice)
        ));
        assert!(matches!(
            StockReconciler::validate_product("Nikon FM2", dec!(-1)),
            Err(InventoryError::NonPositivePrice)
        ));
    }

    #[test]
    fn test_validate_labels() {
        assert!(StockReconciler::validate_labels(None, None, None, None).is_ok());
        assert!(StockReconciler::validate_labels(
            Some("Film Camera"),
            Some("SLR"),
            Some("good"),
            Some("fully_working"),
        )
        .is_ok());

        let err = StockReconciler::validate_labels(Some("Drone"), None, None, None).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::UnknownChoice {
                field: "category",
                ..
            }
        ));

        let err = StockReconciler::validate_labels(None, None, Some("mint"), None).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::UnknownChoice {
                field: "cosmetic_condition",
                ..
            }
        ));
    }
}
