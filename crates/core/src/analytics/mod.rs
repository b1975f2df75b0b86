//! Financial analytics aggregation.
//!
//! Pure calculations over rows the storage layer has already fetched:
//! revenue, cost of goods sold, expense totals, profit, and margin for a
//! resolved date range.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::AnalyticsService;
pub use types::{
    AnalyticsSummary, DailySales, ExpenseRecord, ExpenseTypeTotal, ProductSnapshot, SaleRecord,
};
