//! Property-based tests for availability reconciliation.

use proptest::prelude::*;

use super::reconciler::StockReconciler;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applying any delta never produces a negative availability.
    #[test]
    fn prop_apply_delta_never_negative(
        available in 0u32..100_000,
        delta in -200_000i64..200_000,
    ) {
        let next = StockReconciler::apply_delta(available, delta);
        prop_assert!(i64::from(next) >= 0);
    }

    /// A checked decrement followed by the matching restore is the identity.
    #[test]
    fn prop_decrement_then_restore_round_trips(
        available in 0u32..100_000,
        qty in 0u32..100_000,
    ) {
        prop_assume!(qty <= available);
        StockReconciler::check_decrement(available, qty).unwrap();
        let after_sale = StockReconciler::apply_delta(available, -i64::from(qty));
        let restored = StockReconciler::apply_delta(after_sale, i64::from(qty));
        prop_assert_eq!(restored, available);
    }

    /// The decrement pre-condition accepts exactly the requests that fit.
    #[test]
    fn prop_check_decrement_matches_comparison(
        available in 0u32..100_000,
        requested in 0u32..100_000,
    ) {
        let ok = StockReconciler::check_decrement(available, requested).is_ok();
        prop_assert_eq!(ok, requested <= available);
    }

    /// A stock edit applied through the clamp stays consistent with the
    /// declared stock when availability started equal to stock.
    #[test]
    fn prop_stock_edit_on_untouched_product(
        old_stock in 0u32..50_000,
        new_stock in 0u32..50_000,
    ) {
        let delta = StockReconciler::stock_edit_delta(old_stock, new_stock);
        let next = StockReconciler::apply_delta(old_stock, delta);
        prop_assert_eq!(next, new_stock);
    }
}
