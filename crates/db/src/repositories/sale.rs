//! Sale repository for sale lifecycle database operations.
//!
//! Every mutation that touches availability runs in one transaction with
//! the atomic availability updates from the product repository, so a
//! failed step never leaves inventory half-adjusted.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use relot_core::analytics::{AnalyticsService, DailySales, SaleRecord};
use relot_core::inventory::InventoryError;
use relot_core::sales::{SaleError, SaleLifecycle, ShippingStatus};
use relot_core::timerange::{RangeError, RangeQuery, ResolvedRange};
use relot_shared::{ProductId, SaleId};

use crate::entities::{
    expenses, products, sales, sea_orm_active_enums, shipping_info,
};
use crate::repositories::product::{self, ProductError, ProductRepository};

/// Error types for sale operations.
#[derive(Debug, thiserror::Error)]
pub enum SaleRepoError {
    /// Sale not found.
    #[error("Sale not found: {0}")]
    NotFound(SaleId),

    /// Product the sale refers to was not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Not enough availability for the requested quantity.
    #[error(transparent)]
    Stock(#[from] InventoryError),

    /// Invalid sale input or lifecycle transition.
    #[error(transparent)]
    Invalid(#[from] SaleError),

    /// Invalid reporting range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ProductError> for SaleRepoError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) | ProductError::ReferencedBySales(id) => {
                Self::ProductNotFound(id)
            }
            ProductError::Invalid(e) => Self::Stock(e),
            ProductError::Database(e) => Self::Database(e),
        }
    }
}

/// Input for creating a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleInput {
    /// Product being sold.
    pub product_id: ProductId,
    /// Units sold.
    pub quantity_sold: u32,
    /// Price per unit.
    pub sale_price: Decimal,
    /// Buyer name.
    pub customer: Option<String>,
    /// When the sale happened.
    pub sale_date: chrono::NaiveDateTime,
}

/// Input for updating a sale. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSaleInput {
    /// Move the sale to another product; availability on both products
    /// is reconciled.
    pub product_id: Option<ProductId>,
    /// New quantity; only the difference is charged against availability.
    pub quantity_sold: Option<u32>,
    /// New unit price.
    pub sale_price: Option<Decimal>,
    /// New buyer name.
    pub customer: Option<Option<String>>,
    /// New sale instant.
    pub sale_date: Option<chrono::NaiveDateTime>,
}

/// Input for recording shipping details of a sale.
#[derive(Debug, Clone)]
pub struct ShippingInfoInput {
    /// Recipient name.
    pub customer_name: String,
    /// Recipient email.
    pub customer_email: String,
    /// Recipient phone number.
    pub customer_phone: String,
    /// Delivery address.
    pub customer_address: String,
    /// Delivery postal code.
    pub customer_pincode: String,
}

/// A pending shipment, with how long it has been waiting.
#[derive(Debug, Clone)]
pub struct UnshippedSale {
    /// Sale record.
    pub sale: sales::Model,
    /// Name of the sold product.
    pub product_name: String,
    /// Whole days elapsed since the sale date.
    pub days_since_sale: i64,
}

/// Report of sales still waiting to ship, oldest first.
#[derive(Debug, Clone)]
pub struct UnshippedReport {
    /// Pending sales.
    pub sales: Vec<UnshippedSale>,
    /// Total units across all pending sales.
    pub total_units: u64,
}

/// Outcome of a refund: the updated sale and the compensating expense.
#[derive(Debug, Clone)]
pub struct RefundOutcome {
    /// Sale after the refund flags were set.
    pub sale: sales::Model,
    /// System-generated refund expense.
    pub expense: expenses::Model,
}

/// Sale repository for lifecycle and shipping operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a sale.
    ///
    /// Availability is taken with a single conditional update, and the
    /// product's current price is snapshotted as the unit cost so later
    /// price edits cannot rewrite historical margins.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, `ProductNotFound` for a
    /// missing product, `Stock` when availability is insufficient, or a
    /// database error.
    pub async fn create(&self, input: CreateSaleInput) -> Result<sales::Model, SaleRepoError> {
        SaleLifecycle::validate_sale(input.quantity_sold, input.sale_price)?;

        let txn = self.db.begin().await?;

        let product = products::Entity::find_by_id(input.product_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(SaleRepoError::ProductNotFound(input.product_id))?;

        ProductRepository::take_availability(
            &txn,
            input.product_id.into_inner(),
            input.quantity_sold,
        )
        .await?;

        let now = Utc::now().into();
        let sale = sales::ActiveModel {
            product_id: Set(input.product_id.into_inner()),
            quantity_sold: Set(i32::try_from(input.quantity_sold).unwrap_or(i32::MAX)),
            sale_price: Set(input.sale_price),
            unit_cost_at_sale: Set(product.price),
            customer: Set(input.customer),
            sale_date: Set(input.sale_date),
            shipping_status: Set(sea_orm_active_enums::ShippingStatus::ShippingPending),
            is_refunded: Set(false),
            refunded_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = sale.insert(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            sale_id = created.id,
            product_id = input.product_id.into_inner(),
            quantity = input.quantity_sold,
            "sale recorded"
        );
        Ok(created)
    }

    /// Gets a sale by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no sale has this ID.
    pub async fn get(&self, id: SaleId) -> Result<sales::Model, SaleRepoError> {
        sales::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(SaleRepoError::NotFound(id))
    }

    /// Lists sales, newest sale date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<sales::Model>, SaleRepoError> {
        let rows = sales::Entity::find()
            .order_by_desc(sales::Column::SaleDate)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a sale, reconciling availability by net deltas.
    ///
    /// Changing quantity on the same product charges only the difference,
    /// so shrinking an oversized sale never trips the stock guard. Moving
    /// the sale to another product restores the old product fully, then
    /// charges the new one and re-snapshots the unit cost.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `ProductNotFound` for missing rows, a
    /// validation error for bad input, `Stock` when the new product lacks
    /// availability, or a database error.
    pub async fn update(
        &self,
        id: SaleId,
        input: UpdateSaleInput,
    ) -> Result<sales::Model, SaleRepoError> {
        let txn = self.db.begin().await?;

        let sale = sales::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(SaleRepoError::NotFound(id))?;
        SaleLifecycle::refund_guard(sale.is_refunded)?;

        let old_product = ProductId::from_i64(sale.product_id);
        let old_quantity = product::to_u32(sale.quantity_sold);
        let new_product = input.product_id.unwrap_or(old_product);
        let new_quantity = input.quantity_sold.unwrap_or(old_quantity);
        let new_price = input.sale_price.unwrap_or(sale.sale_price);
        SaleLifecycle::validate_sale(new_quantity, new_price)?;

        for charge in
            SaleLifecycle::availability_charges(old_product, old_quantity, new_product, new_quantity)
        {
            Self::apply_charge(&txn, charge.product_id, charge.delta).await?;
        }

        // Moving to another product re-snapshots the unit cost from it.
        let new_unit_cost = if new_product == old_product {
            None
        } else {
            let product = products::Entity::find_by_id(new_product.into_inner())
                .one(&txn)
                .await?
                .ok_or(SaleRepoError::ProductNotFound(new_product))?;
            Some(product.price)
        };

        let mut active: sales::ActiveModel = sale.into();
        if let Some(product_id) = input.product_id {
            active.product_id = Set(product_id.into_inner());
        }
        if let Some(quantity) = input.quantity_sold {
            active.quantity_sold = Set(i32::try_from(quantity).unwrap_or(i32::MAX));
        }
        if let Some(price) = input.sale_price {
            active.sale_price = Set(price);
        }
        if let Some(unit_cost) = new_unit_cost {
            active.unit_cost_at_sale = Set(unit_cost);
        }
        if let Some(customer) = input.customer {
            active.customer = Set(customer);
        }
        if let Some(sale_date) = input.sale_date {
            active.sale_date = Set(sale_date);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a sale, restoring its units to the product.
    ///
    /// A refunded sale already gave its units back, so only live sales
    /// restore availability here. The product row itself is never
    /// touched beyond its counters.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing sale or a database error.
    pub async fn delete(&self, id: SaleId) -> Result<(), SaleRepoError> {
        let txn = self.db.begin().await?;

        let sale = sales::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(SaleRepoError::NotFound(id))?;

        if !sale.is_refunded {
            ProductRepository::restore_availability(
                &txn,
                sale.product_id,
                product::to_u32(sale.quantity_sold),
            )
            .await?;
        }

        let product_id = sale.product_id;
        sale.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(sale_id = id.into_inner(), product_id, "sale deleted");
        Ok(())
    }

    /// Refunds a sale exactly once.
    ///
    /// Restores availability, books a refund expense for the full sale
    /// amount, and flips the refund flags, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `Invalid(AlreadyRefunded)` on a second refund, `NotFound`
    /// for a missing sale, or a database error.
    pub async fn refund(
        &self,
        id: SaleId,
        reason: &str,
        now: chrono::NaiveDateTime,
    ) -> Result<RefundOutcome, SaleRepoError> {
        let txn = self.db.begin().await?;

        let sale = sales::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(SaleRepoError::NotFound(id))?;
        SaleLifecycle::refund_guard(sale.is_refunded)?;

        let product = products::Entity::find_by_id(sale.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| SaleRepoError::ProductNotFound(ProductId::from_i64(sale.product_id)))?;

        ProductRepository::restore_availability(
            &txn,
            sale.product_id,
            product::to_u32(sale.quantity_sold),
        )
        .await?;

        let expense = refund_expense(&sale, &product.name, reason, now)
            .insert(&txn)
            .await?;

        let mut active: sales::ActiveModel = sale.into();
        active.is_refunded = Set(true);
        active.refunded_at = Set(Some(now));
        active.updated_at = Set(Utc::now().into());
        let sale = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(sale_id = id.into_inner(), amount = %expense.amount, "sale refunded");
        Ok(RefundOutcome { sale, expense })
    }

    /// Sets a sale's shipping status.
    ///
    /// # Errors
    ///
    /// Returns `Invalid(InvalidStatus)` for an unknown status value,
    /// `NotFound` for a missing sale, or a database error.
    pub async fn update_shipping_status(
        &self,
        id: SaleId,
        status: &str,
    ) -> Result<sales::Model, SaleRepoError> {
        let status = ShippingStatus::parse(status)?;
        let sale = self.get(id).await?;

        let mut active: sales::ActiveModel = sale.into();
        active.shipping_status = Set(status.into());
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        tracing::debug!(sale_id = id.into_inner(), ?status, "shipping status updated");
        Ok(updated)
    }

    /// Sales still waiting to ship, oldest first, with waiting time.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_unshipped(
        &self,
        now: chrono::NaiveDateTime,
    ) -> Result<UnshippedReport, SaleRepoError> {
        let rows = sales::Entity::find()
            .filter(
                sales::Column::ShippingStatus
                    .eq(sea_orm_active_enums::ShippingStatus::ShippingPending),
            )
            .filter(sales::Column::IsRefunded.eq(false))
            .order_by_asc(sales::Column::SaleDate)
            .find_also_related(products::Entity)
            .all(&self.db)
            .await?;

        let mut total_units: u64 = 0;
        let mut pending = Vec::with_capacity(rows.len());
        for (sale, product) in rows {
            let product_name = product.map(|p| p.name).unwrap_or_default();
            let days_since_sale = (now.date() - sale.sale_date.date()).num_days();
            total_units += u64::from(product::to_u32(sale.quantity_sold));
            pending.push(UnshippedSale {
                sale,
                product_name,
                days_since_sale,
            });
        }

        Ok(UnshippedReport {
            sales: pending,
            total_units,
        })
    }

    /// Per-day units and revenue for sales inside a range.
    ///
    /// # Errors
    ///
    /// Returns `Range` for a bad range query or a database error.
    pub async fn daily_totals(
        &self,
        query: &RangeQuery,
        now: chrono::NaiveDateTime,
    ) -> Result<(ResolvedRange, Vec<DailySales>), SaleRepoError> {
        let range = ResolvedRange::resolve(query, now)?;

        let rows = sales::Entity::find()
            .filter(sales::Column::SaleDate.gte(range.start))
            .filter(sales::Column::SaleDate.lte(range.end))
            .all(&self.db)
            .await?;

        let records: Vec<SaleRecord> = rows.iter().map(to_sale_record).collect();
        let days = AnalyticsService::daily_breakdown(&range, &records);
        Ok((range, days))
    }

    /// Records or replaces the shipping details for a sale.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing sale or a database error.
    pub async fn set_shipping_info(
        &self,
        id: SaleId,
        input: ShippingInfoInput,
    ) -> Result<shipping_info::Model, SaleRepoError> {
        let txn = self.db.begin().await?;

        sales::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(SaleRepoError::NotFound(id))?;

        let existing = shipping_info::Entity::find()
            .filter(shipping_info::Column::SaleId.eq(id.into_inner()))
            .one(&txn)
            .await?;

        let now = Utc::now().into();
        let saved = if let Some(existing) = existing {
            let mut active: shipping_info::ActiveModel = existing.into();
            active.customer_name = Set(input.customer_name);
            active.customer_email = Set(input.customer_email);
            active.customer_phone = Set(input.customer_phone);
            active.customer_address = Set(input.customer_address);
            active.customer_pincode = Set(input.customer_pincode);
            active.updated_at = Set(now);
            active.update(&txn).await?
        } else {
            let info = shipping_info::ActiveModel {
                sale_id: Set(id.into_inner()),
                customer_name: Set(input.customer_name),
                customer_email: Set(input.customer_email),
                customer_phone: Set(input.customer_phone),
                customer_address: Set(input.customer_address),
                customer_pincode: Set(input.customer_pincode),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            info.insert(&txn).await?
        };

        txn.commit().await?;
        Ok(saved)
    }

    /// Gets the shipping details recorded for a sale, if any.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing sale or a database error.
    pub async fn get_shipping_info(
        &self,
        id: SaleId,
    ) -> Result<Option<shipping_info::Model>, SaleRepoError> {
        sales::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(SaleRepoError::NotFound(id))?;

        let info = shipping_info::Entity::find()
            .filter(shipping_info::Column::SaleId.eq(id.into_inner()))
            .one(&self.db)
            .await?;
        Ok(info)
    }

    /// Applies one signed availability charge atomically.
    async fn apply_charge<C: ConnectionTrait>(
        conn: &C,
        product_id: ProductId,
        delta: i64,
    ) -> Result<(), SaleRepoError> {
        if delta > 0 {
            let qty = u32::try_from(delta).unwrap_or(u32::MAX);
            ProductRepository::restore_availability(conn, product_id.into_inner(), qty).await?;
        } else if delta < 0 {
            let qty = u32::try_from(-delta).unwrap_or(u32::MAX);
            ProductRepository::take_availability(conn, product_id.into_inner(), qty).await?;
        }
        Ok(())
    }
}

impl From<SaleRepoError> for relot_shared::AppError {
    fn from(err: SaleRepoError) -> Self {
        let message = err.to_string();
        match err {
            SaleRepoError::NotFound(_) | SaleRepoError::ProductNotFound(_) => {
                Self::NotFound(message)
            }
            SaleRepoError::Stock(InventoryError::InsufficientStock { .. })
            | SaleRepoError::Invalid(SaleError::AlreadyRefunded) => Self::BusinessRule(message),
            SaleRepoError::Stock(_) | SaleRepoError::Invalid(_) | SaleRepoError::Range(_) => {
                Self::Validation(message)
            }
            SaleRepoError::Database(_) => Self::Database(message),
        }
    }
}

/// Builds the compensating expense row for a refunded sale.
///
/// The expense references both the sale and its product so the refund
/// stays traceable from either side.
fn refund_expense(
    sale: &sales::Model,
    product_name: &str,
    reason: &str,
    now: chrono::NaiveDateTime,
) -> expenses::ActiveModel {
    let amount = SaleLifecycle::refund_amount(product::to_u32(sale.quantity_sold), sale.sale_price);
    let description =
        SaleLifecycle::refund_description(SaleId::from_i64(sale.id), product_name, reason);
    let created_at = Utc::now().into();
    expenses::ActiveModel {
        expense_type: Set(sea_orm_active_enums::ExpenseType::Refund),
        amount: Set(amount),
        description: Set(Some(description)),
        vendor: Set(None),
        date: Set(now.date()),
        sale_id: Set(Some(sale.id)),
        product_id: Set(Some(sale.product_id)),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        ..Default::default()
    }
}

/// Maps a sale row to the analytics input record.
pub(crate) fn to_sale_record(sale: &sales::Model) -> SaleRecord {
    SaleRecord {
        sale_date: sale.sale_date,
        quantity_sold: product::to_u32(sale.quantity_sold),
        sale_price: sale.sale_price,
        unit_cost_at_sale: sale.unit_cost_at_sale,
    }
}

#[cfg(test)]
#[path = "sale_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "sale_props.rs"]
mod props;
