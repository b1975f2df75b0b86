//! Property-based tests for sale availability charges.

use proptest::prelude::*;
use relot_shared::types::ProductId;

use super::lifecycle::SaleLifecycle;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The summed deltas always equal old quantity minus new quantity,
    /// however the charge set is shaped.
    #[test]
    fn prop_charges_conserve_units(
        old_product in 1i64..50,
        new_product in 1i64..50,
        old_qty in 0u32..10_000,
        new_qty in 0u32..10_000,
    ) {
        let charges = SaleLifecycle::availability_charges(
            ProductId(old_product),
            old_qty,
            ProductId(new_product),
            new_qty,
        );
        let total: i64 = charges.iter().map(|c| c.delta).sum();
        prop_assert_eq!(total, i64::from(old_qty) - i64::from(new_qty));
    }

    /// Charges never touch a product other than the two involved, and the
    /// same-product case collapses to at most one entry.
    #[test]
    fn prop_charges_touch_only_involved_products(
        old_product in 1i64..50,
        new_product in 1i64..50,
        old_qty in 0u32..10_000,
        new_qty in 0u32..10_000,
    ) {
        let old_id = ProductId(old_product);
        let new_id = ProductId(new_product);
        let charges = SaleLifecycle::availability_charges(old_id, old_qty, new_id, new_qty);

        for charge in &charges {
            prop_assert!(charge.product_id == old_id || charge.product_id == new_id);
        }
        if old_id == new_id {
            prop_assert!(charges.len() <= 1);
        }
    }
}
