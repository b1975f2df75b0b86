//! Sale lifecycle service.
//!
//! Pure rules called by the sale repository before and during its
//! transactions. Nothing here touches storage.

use rust_decimal::Decimal;

use relot_shared::types::{ProductId, SaleId};

use super::error::SaleError;
use super::types::AvailabilityCharge;

/// Sale lifecycle rules.
pub struct SaleLifecycle;

impl SaleLifecycle {
    /// Validates sale creation or update input.
    ///
    /// # Errors
    ///
    /// Returns a validation error when quantity is zero or the unit price
    /// is not strictly positive.
    pub fn validate_sale(quantity: u32, sale_price: Decimal) -> Result<(), SaleError> {
        if quantity == 0 {
            return Err(SaleError::NonPositiveQuantity);
        }
        if sale_price <= Decimal::ZERO {
            return Err(SaleError::NonPositivePrice);
        }
        Ok(())
    }

    /// Computes the availability deltas needed to move a sale from its old
    /// product/quantity to a new one.
    ///
    /// When the product is unchanged the old and new quantities net against
    /// the same availability counter, so only the difference is charged.
    /// This avoids rejecting an update such as 5 -> 6 units on a product
    /// with one unit left, which a naive restore-then-recharge would pass
    /// but a strict charge-then-restore would not, and keeps a quantity
    /// decrease from ever failing.
    #[must_use]
    pub fn availability_charges(
        old_product: ProductId,
        old_quantity: u32,
        new_product: ProductId,
        new_quantity: u32,
    ) -> Vec<AvailabilityCharge> {
        if old_product == new_product {
            let delta = i64::from(old_quantity) - i64::from(new_quantity);
            if delta == 0 {
                return Vec::new();
            }
            return vec![AvailabilityCharge {
                product_id: old_product,
                delta,
            }];
        }

        vec![
            // Give the old product its units back first.
            AvailabilityCharge {
                product_id: old_product,
                delta: i64::from(old_quantity),
            },
            AvailabilityCharge {
                product_id: new_product,
                delta: -i64::from(new_quantity),
            },
        ]
    }

    /// Guards the one-shot refund transition.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::AlreadyRefunded` when the flag is already set.
    pub const fn refund_guard(is_refunded: bool) -> Result<(), SaleError> {
        if is_refunded {
            return Err(SaleError::AlreadyRefunded);
        }
        Ok(())
    }

    /// Amount of the compensating refund expense: unit price times units.
    #[must_use]
    pub fn refund_amount(quantity: u32, sale_price: Decimal) -> Decimal {
        Decimal::from(quantity) * sale_price
    }

    /// Human-readable description for a system-generated refund expense.
    #[must_use]
    pub fn refund_description(sale_id: SaleId, product_name: &str, reason: &str) -> String {
        format!("Refund for sale #{sale_id} ({product_name}): {reason}")
    }
}
