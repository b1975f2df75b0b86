//! Property tests for the analytics aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AnalyticsService;
use super::types::{ExpenseRecord, SaleRecord};
use crate::expense::ExpenseType;
use crate::timerange::{RangeQuery, ResolvedRange};

fn march_2025() -> ResolvedRange {
    let query = RangeQuery {
        start_date: Some("2025-03-01".to_owned()),
        end_date: Some("2025-03-31".to_owned()),
        duration: None,
    };
    let now = NaiveDate::from_ymd_opt(2025, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    ResolvedRange::resolve(&query, now).unwrap()
}

fn arb_sale() -> impl Strategy<Value = SaleRecord> {
    (1u32..=31, 0u32..24, 1u32..100, 1i64..100_000, 1i64..100_000).prop_map(
        |(day, hour, qty, price_cents, cost_cents)| SaleRecord {
            sale_date: NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            quantity_sold: qty,
            sale_price: Decimal::new(price_cents, 2),
            unit_cost_at_sale: Decimal::new(cost_cents, 2),
        },
    )
}

fn arb_expense() -> impl Strategy<Value = ExpenseRecord> {
    let kind = prop_oneof![
        Just(ExpenseType::Servicing),
        Just(ExpenseType::Refund),
        Just(ExpenseType::Shipping),
        Just(ExpenseType::Misc),
    ];
    (1u32..=31, 1i64..100_000, kind).prop_map(|(day, amount_cents, expense_type)| ExpenseRecord {
        date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        expense_type,
        amount: Decimal::new(amount_cents, 2),
    })
}

proptest! {
    #[test]
    fn prop_profit_identity(
        sales in prop::collection::vec(arb_sale(), 0..20),
        expenses in prop::collection::vec(arb_expense(), 0..20),
    ) {
        let range = march_2025();
        let summary = AnalyticsService::compute_summary(&range, &[], &sales, &expenses);
        prop_assert_eq!(
            summary.profit,
            summary.revenue - summary.cost_of_goods_sold - summary.total_expenses
        );
    }

    #[test]
    fn prop_daily_breakdown_conserves_totals(
        sales in prop::collection::vec(arb_sale(), 0..20),
    ) {
        let range = march_2025();
        let summary = AnalyticsService::compute_summary(&range, &[], &sales, &[]);
        let days = AnalyticsService::daily_breakdown(&range, &sales);

        let day_revenue: Decimal = days.iter().map(|d| d.revenue).sum();
        let day_units: u64 = days.iter().map(|d| d.units_sold).sum();
        let total_units: u64 = sales.iter().map(|s| u64::from(s.quantity_sold)).sum();

        prop_assert_eq!(day_revenue, summary.revenue);
        prop_assert_eq!(day_units, total_units);
    }

    #[test]
    fn prop_daily_breakdown_sorted(
        sales in prop::collection::vec(arb_sale(), 0..20),
    ) {
        let range = march_2025();
        let days = AnalyticsService::daily_breakdown(&range, &sales);
        prop_assert!(days.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn prop_expense_totals_conserve_grand_total(
        expenses in prop::collection::vec(arb_expense(), 0..20),
    ) {
        let range = march_2025();
        let (by_type, grand_total) = AnalyticsService::expense_totals_by_type(&range, &expenses);
        let summed: Decimal = by_type.iter().map(|t| t.total).sum();
        prop_assert_eq!(summed, grand_total);
    }

    #[test]
    fn prop_margin_zero_iff_zero_cost(profit_cents in -100_000i64..100_000) {
        let profit = Decimal::new(profit_cents, 2);
        prop_assert_eq!(AnalyticsService::margin(profit, Decimal::ZERO), Decimal::ZERO);
    }
}
