//! Expense repository for spend tracking database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use relot_core::analytics::{AnalyticsService, ExpenseRecord, ExpenseTypeTotal};
use relot_core::expense::{ExpenseError, ExpenseKind, ExpenseType};
use relot_core::timerange::{RangeError, RangeQuery, ResolvedRange};
use relot_shared::{ExpenseId, ProductId, SaleId};

use crate::entities::{expenses, products, sales};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseRepoError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    /// Referenced sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    /// Referenced product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Invalid expense input.
    #[error(transparent)]
    Invalid(#[from] ExpenseError),

    /// Invalid reporting range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Kind tag as its wire value.
    pub expense_type: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Free-form description.
    pub description: Option<String>,
    /// Who was paid.
    pub vendor: Option<String>,
    /// Expense date; immutable after creation.
    pub date: chrono::NaiveDate,
    /// Sale the expense belongs to, when the kind requires or allows one.
    pub sale_id: Option<SaleId>,
    /// Product the expense belongs to, when the kind requires one.
    pub product_id: Option<ProductId>,
}

/// Per-kind totals for a range, with the grand total.
#[derive(Debug, Clone)]
pub struct ExpenseSummary {
    /// Resolved range start (`YYYY-MM-DD`).
    pub start_date: String,
    /// Resolved range end (`YYYY-MM-DD`).
    pub end_date: String,
    /// Totals per expense kind, kinds without spend omitted.
    pub by_type: Vec<ExpenseTypeTotal>,
    /// Sum across all kinds.
    pub total: Decimal,
}

/// Expense repository for spend records and summaries.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an expense.
    ///
    /// The kind decides which references are required: servicing needs a
    /// product, refund needs both the sale and its product, shipping may
    /// carry a sale.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown kind, a missing required
    /// reference, or a non-positive amount; `SaleNotFound` or
    /// `ProductNotFound` for dangling references; or a database error.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, ExpenseRepoError> {
        let expense_type = ExpenseType::parse(&input.expense_type)?;
        let kind = ExpenseKind::from_parts(expense_type, input.sale_id, input.product_id)?;
        ExpenseKind::validate_amount(input.amount)?;

        if let Some(sale_id) = kind.sale_id() {
            sales::Entity::find_by_id(sale_id.into_inner())
                .one(&self.db)
                .await?
                .ok_or(ExpenseRepoError::SaleNotFound(sale_id))?;
        }
        if let Some(product_id) = kind.product_id() {
            products::Entity::find_by_id(product_id.into_inner())
                .one(&self.db)
                .await?
                .ok_or(ExpenseRepoError::ProductNotFound(product_id))?;
        }

        let now = Utc::now().into();
        let expense = expenses::ActiveModel {
            expense_type: Set(kind.expense_type().into()),
            amount: Set(input.amount),
            description: Set(input.description),
            vendor: Set(input.vendor),
            date: Set(input.date),
            sale_id: Set(kind.sale_id().map(SaleId::into_inner)),
            product_id: Set(kind.product_id().map(ProductId::into_inner)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = expense.insert(&self.db).await?;
        tracing::info!(
            expense_id = created.id,
            expense_type = %input.expense_type,
            "expense recorded"
        );
        Ok(created)
    }

    /// Gets an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no expense has this ID.
    pub async fn get(&self, id: ExpenseId) -> Result<expenses::Model, ExpenseRepoError> {
        expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ExpenseRepoError::NotFound(id))
    }

    /// Lists expenses dated inside a range, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Range` for a bad range query or a database error.
    pub async fn list(
        &self,
        query: &RangeQuery,
        now: chrono::NaiveDateTime,
    ) -> Result<(ResolvedRange, Vec<expenses::Model>), ExpenseRepoError> {
        let range = ResolvedRange::resolve(query, now)?;
        let rows = expenses::Entity::find()
            .filter(expenses::Column::Date.gte(range.start.date()))
            .filter(expenses::Column::Date.lte(range.end.date()))
            .order_by_desc(expenses::Column::Date)
            .all(&self.db)
            .await?;
        Ok((range, rows))
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing expense or a database error.
    pub async fn delete(&self, id: ExpenseId) -> Result<(), ExpenseRepoError> {
        let result = expenses::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ExpenseRepoError::NotFound(id));
        }
        tracing::info!(expense_id = id.into_inner(), "expense deleted");
        Ok(())
    }

    /// Totals spend per kind inside a range.
    ///
    /// # Errors
    ///
    /// Returns `Range` for a bad range query or a database error.
    pub async fn summary_by_type(
        &self,
        query: &RangeQuery,
        now: chrono::NaiveDateTime,
    ) -> Result<ExpenseSummary, ExpenseRepoError> {
        let (range, rows) = self.list(query, now).await?;
        let records: Vec<ExpenseRecord> = rows.iter().map(to_expense_record).collect();
        let (by_type, total) = AnalyticsService::expense_totals_by_type(&range, &records);

        Ok(ExpenseSummary {
            start_date: range.start_date(),
            end_date: range.end_date(),
            by_type,
            total,
        })
    }
}

/// Maps an expense row to the analytics input record.
pub(crate) fn to_expense_record(expense: &expenses::Model) -> ExpenseRecord {
    ExpenseRecord {
        date: expense.date,
        expense_type: expense.expense_type.into(),
        amount: expense.amount,
    }
}

impl From<ExpenseRepoError> for relot_shared::AppError {
    fn from(err: ExpenseRepoError) -> Self {
        let message = err.to_string();
        match err {
            ExpenseRepoError::NotFound(_)
            | ExpenseRepoError::SaleNotFound(_)
            | ExpenseRepoError::ProductNotFound(_) => Self::NotFound(message),
            ExpenseRepoError::Invalid(_) | ExpenseRepoError::Range(_) => Self::Validation(message),
            ExpenseRepoError::Database(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
#[path = "expense_tests.rs"]
mod tests;
