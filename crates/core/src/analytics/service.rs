//! Range-bounded financial aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{
    AnalyticsSummary, DailySales, ExpenseRecord, ExpenseTypeTotal, ProductSnapshot, SaleRecord,
};
use crate::timerange::ResolvedRange;

/// Pure aggregation over rows the storage layer has fetched.
///
/// No database access and no wall clock in here; the repository resolves
/// the range, loads the rows, and hands both over.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Computes the financial summary for a resolved range.
    ///
    /// Every figure except `total_unsold_inventory` is bounded by the
    /// range; unsold inventory is always the current snapshot.
    #[must_use]
    pub fn compute_summary(
        range: &ResolvedRange,
        products: &[ProductSnapshot],
        sales: &[SaleRecord],
        expenses: &[ExpenseRecord],
    ) -> AnalyticsSummary {
        let inventory_bought: Decimal = products
            .iter()
            .filter(|p| p.bought_at.is_some_and(|at| range.contains(at)))
            .map(|p| Decimal::from(p.stock) * p.price)
            .sum();

        let in_range_sales: Vec<&SaleRecord> = sales
            .iter()
            .filter(|s| range.contains(s.sale_date))
            .collect();

        let revenue: Decimal = in_range_sales
            .iter()
            .map(|s| Decimal::from(s.quantity_sold) * s.sale_price)
            .sum();

        let cost_of_goods_sold: Decimal = in_range_sales
            .iter()
            .map(|s| Decimal::from(s.quantity_sold) * s.unit_cost_at_sale)
            .sum();

        let total_unsold_inventory: Decimal = products
            .iter()
            .filter(|p| p.available_quantity > 0)
            .map(|p| Decimal::from(p.available_quantity) * p.price)
            .sum();

        let total_expenses: Decimal = expenses
            .iter()
            .filter(|e| range.contains_date(e.date))
            .map(|e| e.amount)
            .sum();

        let profit = revenue - cost_of_goods_sold - total_expenses;
        let profit_margin = Self::margin(profit, cost_of_goods_sold);

        AnalyticsSummary {
            start_date: range.start_date(),
            end_date: range.end_date(),
            inventory_bought,
            revenue,
            cost_of_goods_sold,
            total_unsold_inventory,
            total_expenses,
            profit,
            profit_margin,
        }
    }

    /// Profit relative to cost, as a percentage rounded to 2 places.
    ///
    /// Zero cost yields zero rather than dividing by zero; a period with
    /// no sales has no meaningful margin.
    #[must_use]
    pub fn margin(profit: Decimal, cost_of_goods_sold: Decimal) -> Decimal {
        if cost_of_goods_sold.is_zero() {
            Decimal::ZERO
        } else {
            (profit / cost_of_goods_sold * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Groups sales in range by calendar day, ordered by day ascending.
    #[must_use]
    pub fn daily_breakdown(range: &ResolvedRange, sales: &[SaleRecord]) -> Vec<DailySales> {
        let mut days: BTreeMap<chrono::NaiveDate, (u64, Decimal)> = BTreeMap::new();
        for sale in sales.iter().filter(|s| range.contains(s.sale_date)) {
            let entry = days.entry(sale.sale_date.date()).or_default();
            entry.0 += u64::from(sale.quantity_sold);
            entry.1 += Decimal::from(sale.quantity_sold) * sale.sale_price;
        }
        days.into_iter()
            .map(|(day, (units_sold, revenue))| DailySales {
                day,
                units_sold,
                revenue,
            })
            .collect()
    }

    /// Totals expenses in range per kind, plus the grand total.
    ///
    /// Kinds with no spend in the range are omitted. Totals come back in
    /// a stable order (by kind tag).
    #[must_use]
    pub fn expense_totals_by_type(
        range: &ResolvedRange,
        expenses: &[ExpenseRecord],
    ) -> (Vec<ExpenseTypeTotal>, Decimal) {
        let mut totals: BTreeMap<&'static str, (crate::expense::ExpenseType, Decimal)> =
            BTreeMap::new();
        let mut grand_total = Decimal::ZERO;
        for expense in expenses.iter().filter(|e| range.contains_date(e.date)) {
            let entry = totals
                .entry(expense.expense_type.as_str())
                .or_insert((expense.expense_type, Decimal::ZERO));
            entry.1 += expense.amount;
            grand_total += expense.amount;
        }
        let by_type = totals
            .into_values()
            .map(|(expense_type, total)| ExpenseTypeTotal { expense_type, total })
            .collect();
        (by_type, grand_total)
    }
}
