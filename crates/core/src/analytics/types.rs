//! Analytics input rows and report types.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::ExpenseType;

/// The product fields analytics needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    /// Current unit price.
    pub price: Decimal,
    /// Total units received for the current lot-linked quantity.
    pub stock: u32,
    /// Units still available for sale.
    pub available_quantity: u32,
    /// Acquisition instant, when known.
    pub bought_at: Option<NaiveDateTime>,
}

/// The sale fields analytics needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    /// When the sale happened.
    pub sale_date: NaiveDateTime,
    /// Units sold.
    pub quantity_sold: u32,
    /// Unit sale price.
    pub sale_price: Decimal,
    /// Unit cost captured when the sale was created; basis for COGS.
    pub unit_cost_at_sale: Decimal,
}

/// The expense fields analytics needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    /// Expense date.
    pub date: NaiveDate,
    /// Expense kind tag.
    pub expense_type: ExpenseType,
    /// Expense amount.
    pub amount: Decimal,
}

/// Range-bounded financial summary.
///
/// `total_unsold_inventory` is always a current snapshot, independent of
/// the range; everything else is bounded by `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Resolved range start (`YYYY-MM-DD`).
    pub start_date: String,
    /// Resolved range end (`YYYY-MM-DD`).
    pub end_date: String,
    /// Value of inventory acquired in range: sum(stock * price).
    pub inventory_bought: Decimal,
    /// Sales revenue in range: sum(quantity_sold * sale_price).
    pub revenue: Decimal,
    /// Cost of goods sold in range: sum(quantity_sold * unit_cost_at_sale).
    pub cost_of_goods_sold: Decimal,
    /// Snapshot value of everything still unsold:
    /// sum(available_quantity * price).
    pub total_unsold_inventory: Decimal,
    /// Expenses dated in range.
    pub total_expenses: Decimal,
    /// Canonical profit: revenue - COGS - expenses.
    pub profit: Decimal,
    /// Profit relative to COGS, as a percentage; zero when COGS is zero.
    pub profit_margin: Decimal,
}

/// One day of sales activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    /// Calendar day.
    pub day: NaiveDate,
    /// Units sold that day.
    pub units_sold: u64,
    /// Revenue booked that day.
    pub revenue: Decimal,
}

/// Total spend for one expense kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTypeTotal {
    /// Expense kind tag.
    pub expense_type: ExpenseType,
    /// Summed amount for the kind.
    pub total: Decimal,
}
