//! Payment repository for lot payment database operations.
//!
//! Every mutation recomputes the owning lot's payment status inside the
//! same transaction, so a lot's status can never lag its payments.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use relot_core::lot::{LotError, LotTracker};
use relot_shared::{LotId, PaymentId};

use crate::entities::{lots, payments};
use crate::repositories::lot::{LotRepoError, LotRepository};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(PaymentId),

    /// Target lot not found.
    #[error("Lot not found: {0}")]
    LotNotFound(LotId),

    /// Invalid payment input.
    #[error(transparent)]
    Invalid(#[from] LotError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LotRepoError> for PaymentError {
    fn from(err: LotRepoError) -> Self {
        match err {
            LotRepoError::NotFound(id) | LotRepoError::ReferencedByProducts(id) => {
                Self::LotNotFound(id)
            }
            LotRepoError::Invalid(e) => Self::Invalid(e),
            LotRepoError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating a payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    /// Lot the payment is for.
    pub lot_id: LotId,
    /// Amount paid.
    pub amount: Decimal,
    /// Date the payment was made.
    pub payment_date: chrono::NaiveDate,
    /// Payment method label.
    pub payment_method: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Input for updating a payment. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentInput {
    /// Reassign the payment to another lot; both lots are recomputed.
    pub lot_id: Option<LotId>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New payment date.
    pub payment_date: Option<chrono::NaiveDate>,
    /// New payment method label.
    pub payment_method: Option<Option<String>>,
    /// New notes.
    pub notes: Option<Option<String>>,
}

/// Payment repository keeping lot statuses in sync.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment against a lot and recomputes the lot's status.
    ///
    /// # Errors
    ///
    /// Returns `LotNotFound` for a missing lot, a validation error for a
    /// non-positive amount, or a database error.
    pub async fn create(&self, input: CreatePaymentInput) -> Result<payments::Model, PaymentError> {
        LotTracker::validate_payment(input.amount)?;

        let txn = self.db.begin().await?;

        lots::Entity::find_by_id(input.lot_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(PaymentError::LotNotFound(input.lot_id))?;

        let now = Utc::now().into();
        let payment = payments::ActiveModel {
            lot_id: Set(input.lot_id.into_inner()),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            payment_method: Set(input.payment_method),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = payment.insert(&txn).await?;

        let status = LotRepository::recompute_status(&txn, input.lot_id.into_inner()).await?;
        txn.commit().await?;

        tracing::info!(
            payment_id = created.id,
            lot_id = input.lot_id.into_inner(),
            ?status,
            "payment recorded"
        );
        Ok(created)
    }

    /// Gets a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no payment has this ID.
    pub async fn get(&self, id: PaymentId) -> Result<payments::Model, PaymentError> {
        payments::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    /// Lists payments for a lot, newest payment date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_lot(&self, lot_id: LotId) -> Result<Vec<payments::Model>, PaymentError> {
        let rows = payments::Entity::find()
            .filter(payments::Column::LotId.eq(lot_id.into_inner()))
            .order_by_desc(payments::Column::PaymentDate)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a payment and recomputes every affected lot's status.
    ///
    /// Reassigning a payment to another lot recomputes both the old and
    /// the new lot in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing payment, `LotNotFound` when
    /// reassigning to a missing lot, a validation error for a
    /// non-positive amount, or a database error.
    pub async fn update(
        &self,
        id: PaymentId,
        input: UpdatePaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        if let Some(amount) = input.amount {
            LotTracker::validate_payment(amount)?;
        }

        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        let old_lot_id = payment.lot_id;

        if let Some(new_lot) = input.lot_id {
            lots::Entity::find_by_id(new_lot.into_inner())
                .one(&txn)
                .await?
                .ok_or(PaymentError::LotNotFound(new_lot))?;
        }

        let mut active: payments::ActiveModel = payment.into();
        if let Some(lot_id) = input.lot_id {
            active.lot_id = Set(lot_id.into_inner());
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(payment_date) = input.payment_date {
            active.payment_date = Set(payment_date);
        }
        if let Some(payment_method) = input.payment_method {
            active.payment_method = Set(payment_method);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;

        LotRepository::recompute_status(&txn, updated.lot_id).await?;
        if updated.lot_id != old_lot_id {
            LotRepository::recompute_status(&txn, old_lot_id).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a payment and recomputes its lot's status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing payment or a database error.
    pub async fn delete(&self, id: PaymentId) -> Result<(), PaymentError> {
        let txn = self.db.begin().await?;

        let payment = payments::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;
        let lot_id = payment.lot_id;

        payment.delete(&txn).await?;
        let status = LotRepository::recompute_status(&txn, lot_id).await?;

        txn.commit().await?;
        tracing::info!(
            payment_id = id.into_inner(),
            lot_id,
            ?status,
            "payment deleted"
        );
        Ok(())
    }
}

impl From<PaymentError> for relot_shared::AppError {
    fn from(err: PaymentError) -> Self {
        let message = err.to_string();
        match err {
            PaymentError::NotFound(_) | PaymentError::LotNotFound(_) => Self::NotFound(message),
            PaymentError::Invalid(_) => Self::Validation(message),
            PaymentError::Database(_) => Self::Database(message),
        }
    }
}
