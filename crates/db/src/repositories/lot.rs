//! Lot repository for purchase lot database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use relot_core::lot::{LotError, LotTracker, payment_status};
use relot_shared::LotId;

use crate::entities::{lots, payments, products, sea_orm_active_enums::LotPaymentStatus};

/// Error types for lot operations.
#[derive(Debug, thiserror::Error)]
pub enum LotRepoError {
    /// Lot not found.
    #[error("Lot not found: {0}")]
    NotFound(LotId),

    /// Lot still has products linked to it.
    #[error("Lot {0} has linked products and cannot be deleted")]
    ReferencedByProducts(LotId),

    /// Invalid lot input.
    #[error(transparent)]
    Invalid(#[from] LotError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a lot.
#[derive(Debug, Clone)]
pub struct CreateLotInput {
    /// Lot title.
    pub title: String,
    /// Agreed total price for the lot.
    pub total_price: Decimal,
    /// Purchase date.
    pub bought_on: chrono::NaiveDate,
    /// Seller.
    pub bought_from: Option<String>,
}

/// Input for updating a lot. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateLotInput {
    /// New title.
    pub title: Option<String>,
    /// New agreed total; the payment status is recomputed against it.
    pub total_price: Option<Decimal>,
    /// New purchase date.
    pub bought_on: Option<chrono::NaiveDate>,
    /// New seller.
    pub bought_from: Option<Option<String>>,
    /// New settle date.
    pub paid_on: Option<Option<chrono::NaiveDate>>,
}

/// Lot row together with the sum of its recorded payments.
#[derive(Debug, Clone)]
pub struct LotWithTotalPaid {
    /// Lot record.
    pub lot: lots::Model,
    /// Sum of payment amounts; zero when no payments exist.
    pub total_paid: Decimal,
}

/// Lot repository for CRUD and payment-status maintenance.
#[derive(Debug, Clone)]
pub struct LotRepository {
    db: DatabaseConnection,
}

impl LotRepository {
    /// Creates a new lot repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a lot. A new lot has no payments, so it starts pending.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank title or non-positive
    /// total, or a database error.
    pub async fn create(&self, input: CreateLotInput) -> Result<lots::Model, LotRepoError> {
        LotTracker::validate_lot(&input.title, input.total_price)?;

        let now = Utc::now().into();
        let lot = lots::ActiveModel {
            title: Set(input.title),
            total_price: Set(input.total_price),
            bought_on: Set(input.bought_on),
            bought_from: Set(input.bought_from),
            paid_on: Set(None),
            status: Set(LotPaymentStatus::PaymentPending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = lot.insert(&self.db).await?;
        tracing::info!(lot_id = created.id, "lot created");
        Ok(created)
    }

    /// Gets a lot by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no lot has this ID.
    pub async fn get(&self, id: LotId) -> Result<lots::Model, LotRepoError> {
        lots::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(LotRepoError::NotFound(id))
    }

    /// Gets a lot together with its paid total.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no lot has this ID.
    pub async fn get_with_total_paid(&self, id: LotId) -> Result<LotWithTotalPaid, LotRepoError> {
        let lot = self.get(id).await?;
        let total_paid = Self::total_paid(&self.db, lot.id).await?;
        Ok(LotWithTotalPaid { lot, total_paid })
    }

    /// Lists lots ordered by purchase date, newest first, each with its
    /// paid total.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list(&self) -> Result<Vec<LotWithTotalPaid>, LotRepoError> {
        let lot_rows = lots::Entity::find()
            .order_by_desc(lots::Column::BoughtOn)
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(lot_rows.len());
        for lot in lot_rows {
            let total_paid = Self::total_paid(&self.db, lot.id).await?;
            result.push(LotWithTotalPaid { lot, total_paid });
        }
        Ok(result)
    }

    /// Updates a lot, then recomputes its payment status in case the
    /// agreed total changed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing lot, a validation error for bad
    /// input, or a database error.
    pub async fn update(&self, id: LotId, input: UpdateLotInput) -> Result<lots::Model, LotRepoError> {
        let lot = self.get(id).await?;

        let title = input.title.as_deref().unwrap_or(&lot.title);
        let total_price = input.total_price.unwrap_or(lot.total_price);
        LotTracker::validate_lot(title, total_price)?;

        let mut active: lots::ActiveModel = lot.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(total_price) = input.total_price {
            active.total_price = Set(total_price);
        }
        if let Some(bought_on) = input.bought_on {
            active.bought_on = Set(bought_on);
        }
        if let Some(bought_from) = input.bought_from {
            active.bought_from = Set(bought_from);
        }
        if let Some(paid_on) = input.paid_on {
            active.paid_on = Set(paid_on);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&self.db).await?;
        Self::recompute_status(&self.db, id.into_inner()).await?;
        self.get(id).await
    }

    /// Deletes a lot. Payments cascade; linked products block deletion.
    ///
    /// # Errors
    ///
    /// Returns `ReferencedByProducts` while any product points at the
    /// lot, `NotFound` if it does not exist.
    pub async fn delete(&self, id: LotId) -> Result<(), LotRepoError> {
        let product_count = products::Entity::find()
            .filter(products::Column::LotId.eq(id.into_inner()))
            .count(&self.db)
            .await?;

        if product_count > 0 {
            return Err(LotRepoError::ReferencedByProducts(id));
        }

        let result = lots::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LotRepoError::NotFound(id));
        }

        tracing::info!(lot_id = id.into_inner(), "lot deleted");
        Ok(())
    }

    /// Re-derives a lot's payment status from its recorded payments.
    ///
    /// Runs on the caller's connection so payment mutations can fold it
    /// into their own transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the lot row is gone.
    pub(crate) async fn recompute_status<C: ConnectionTrait>(
        conn: &C,
        lot_id: i64,
    ) -> Result<LotPaymentStatus, LotRepoError> {
        let lot = lots::Entity::find_by_id(lot_id)
            .one(conn)
            .await?
            .ok_or(LotRepoError::NotFound(LotId::from_i64(lot_id)))?;

        let total_paid = Self::total_paid(conn, lot_id).await?;
        let status: LotPaymentStatus = payment_status(total_paid, lot.total_price).into();

        let mut active: lots::ActiveModel = lot.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await?;

        tracing::debug!(lot_id, ?status, %total_paid, "lot status recomputed");
        Ok(status)
    }

    /// Sums the payment amounts recorded against a lot.
    async fn total_paid<C: ConnectionTrait>(conn: &C, lot_id: i64) -> Result<Decimal, DbErr> {
        let rows = payments::Entity::find()
            .filter(payments::Column::LotId.eq(lot_id))
            .all(conn)
            .await?;
        Ok(rows.iter().map(|p| p.amount).sum())
    }
}

impl From<LotRepoError> for relot_shared::AppError {
    fn from(err: LotRepoError) -> Self {
        let message = err.to_string();
        match err {
            LotRepoError::NotFound(_) => Self::NotFound(message),
            LotRepoError::ReferencedByProducts(_) => Self::Conflict(message),
            LotRepoError::Invalid(_) => Self::Validation(message),
            LotRepoError::Database(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
#[path = "lot_tests.rs"]
mod tests;
