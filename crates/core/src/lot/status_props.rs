//! Property-based tests for lot payment status derivation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::status::{payment_status, LotPaymentStatus};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `paid` exactly when the payment total covers the agreed price.
    #[test]
    fn prop_paid_iff_total_covered(
        total_paid in amount_strategy(),
        total_price in price_strategy(),
    ) {
        let status = payment_status(total_paid, total_price);
        prop_assert_eq!(status == LotPaymentStatus::Paid, total_paid >= total_price);
    }

    /// `payment_pending` exactly when nothing has been paid (on an
    /// unfinished lot).
    #[test]
    fn prop_pending_iff_zero(
        total_paid in amount_strategy(),
        total_price in price_strategy(),
    ) {
        prop_assume!(total_paid < total_price);
        let status = payment_status(total_paid, total_price);
        prop_assert_eq!(status == LotPaymentStatus::PaymentPending, total_paid.is_zero());
    }

    /// Recording an additional payment never moves the status backwards.
    #[test]
    fn prop_status_monotonic_in_payments(
        total_paid in amount_strategy(),
        extra in amount_strategy(),
        total_price in price_strategy(),
    ) {
        let before = payment_status(total_paid, total_price);
        let after = payment_status(total_paid + extra, total_price);
        prop_assert!(after >= before);
    }
}
