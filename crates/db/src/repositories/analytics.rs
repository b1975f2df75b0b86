//! Analytics repository: loads rows and delegates to the pure aggregator.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

use relot_core::analytics::{AnalyticsService, AnalyticsSummary, ProductSnapshot};
use relot_core::timerange::{RangeError, RangeQuery, ResolvedRange};

use crate::entities::{expenses, products, sales};
use crate::repositories::expense::to_expense_record;
use crate::repositories::product::to_u32;
use crate::repositories::sale::to_sale_record;

/// Error types for analytics queries.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Invalid reporting range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Read-only repository for financial summaries.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    db: DatabaseConnection,
}

impl AnalyticsRepository {
    /// Creates a new analytics repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Financial summary for the queried range.
    ///
    /// Resolves the range against `now`, loads product, sale, and
    /// expense rows, and hands them to the pure aggregator. The summary
    /// echoes the resolved dates so callers can display them.
    ///
    /// # Errors
    ///
    /// Returns `Range` for a bad range query or a database error.
    pub async fn summary(
        &self,
        query: &RangeQuery,
        now: chrono::NaiveDateTime,
    ) -> Result<AnalyticsSummary, AnalyticsError> {
        let range = ResolvedRange::resolve(query, now)?;

        // Products load in full: the unsold snapshot is range-independent.
        let product_rows = products::Entity::find().all(&self.db).await?;
        let sale_rows = sales::Entity::find().all(&self.db).await?;
        let expense_rows = expenses::Entity::find().all(&self.db).await?;

        let product_records: Vec<ProductSnapshot> = product_rows
            .iter()
            .map(|p| ProductSnapshot {
                price: p.price,
                stock: to_u32(p.stock),
                available_quantity: to_u32(p.available_quantity),
                bought_at: p.bought_at,
            })
            .collect();
        let sale_records: Vec<_> = sale_rows.iter().map(to_sale_record).collect();
        let expense_records: Vec<_> = expense_rows.iter().map(to_expense_record).collect();

        Ok(AnalyticsService::compute_summary(
            &range,
            &product_records,
            &sale_records,
            &expense_records,
        ))
    }
}

impl From<AnalyticsError> for relot_shared::AppError {
    fn from(err: AnalyticsError) -> Self {
        let message = err.to_string();
        match err {
            AnalyticsError::Range(_) => Self::Validation(message),
            AnalyticsError::Database(_) => Self::Database(message),
        }
    }
}
