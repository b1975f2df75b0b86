//! Product repository for inventory database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use relot_core::inventory::{InventoryError, StockReconciler};
use relot_core::timerange::{DurationKeyword, ResolvedRange};
use relot_shared::ProductId;

use crate::entities::{products, sales};

/// Error types for product operations.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// Product not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Product still has sales recorded against it.
    #[error("Product {0} has recorded sales and cannot be deleted")]
    ReferencedBySales(ProductId),

    /// Invalid product input or stock movement.
    #[error(transparent)]
    Invalid(#[from] InventoryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Free-form specs text.
    pub specs: Option<String>,
    /// Asking price per unit.
    pub price: Decimal,
    /// Units received.
    pub stock: u32,
    /// Category label.
    pub category: Option<String>,
    /// Sub-category label.
    pub sub_category: Option<String>,
    /// Cosmetic condition label.
    pub cosmetic_condition: Option<String>,
    /// Working condition label.
    pub working_condition: Option<String>,
    /// Seller the product came from.
    pub bought_from: Option<String>,
    /// Acquisition instant.
    pub bought_at: Option<chrono::NaiveDateTime>,
    /// Purchase lot the product belongs to.
    pub lot_id: Option<i64>,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// New name.
    pub name: Option<String>,
    /// New specs text.
    pub specs: Option<Option<String>>,
    /// New price.
    pub price: Option<Decimal>,
    /// New declared stock; availability moves by the same delta.
    pub stock: Option<u32>,
    /// New category label.
    pub category: Option<Option<String>>,
    /// New sub-category label.
    pub sub_category: Option<Option<String>>,
    /// New cosmetic condition label.
    pub cosmetic_condition: Option<Option<String>>,
    /// New working condition label.
    pub working_condition: Option<Option<String>>,
    /// New seller.
    pub bought_from: Option<Option<String>>,
    /// New acquisition instant.
    pub bought_at: Option<Option<chrono::NaiveDateTime>>,
    /// New owning lot.
    pub lot_id: Option<Option<i64>>,
}

/// Stock-position overview for the inventory landing view.
#[derive(Debug, Clone)]
pub struct ProductOverview {
    /// Number of products with units still available.
    pub unsold_count: usize,
    /// Products with units still available.
    pub unsold: Vec<products::Model>,
    /// Products acquired in the current calendar month.
    pub bought_this_month: Vec<products::Model>,
}

/// Product repository for CRUD and availability operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a product. Availability starts equal to stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the input fails validation or the insert fails.
    pub async fn create(&self, input: CreateProductInput) -> Result<products::Model, ProductError> {
        StockReconciler::validate_product(&input.name, input.price)?;
        StockReconciler::validate_labels(
            input.category.as_deref(),
            input.sub_category.as_deref(),
            input.cosmetic_condition.as_deref(),
            input.working_condition.as_deref(),
        )?;

        let now = Utc::now().into();
        let stock = i32::try_from(input.stock).unwrap_or(i32::MAX);

        let product = products::ActiveModel {
            name: Set(input.name),
            specs: Set(input.specs),
            price: Set(input.price),
            stock: Set(stock),
            available_quantity: Set(stock),
            category: Set(input.category),
            sub_category: Set(input.sub_category),
            cosmetic_condition: Set(input.cosmetic_condition),
            working_condition: Set(input.working_condition),
            bought_from: Set(input.bought_from),
            bought_at: Set(input.bought_at),
            lot_id: Set(input.lot_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = product.insert(&self.db).await?;
        tracing::info!(product_id = created.id, stock, "product created");
        Ok(created)
    }

    /// Gets a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has this ID.
    pub async fn get(&self, id: ProductId) -> Result<products::Model, ProductError> {
        products::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Lists all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<products::Model>, ProductError> {
        let rows = products::Entity::find()
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Updates a product.
    ///
    /// A stock change moves availability by the same delta, floored at
    /// zero. Runs in a transaction so the two counters never drift.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing product, a validation error for
    /// bad input, or a database error.
    pub async fn update(
        &self,
        id: ProductId,
        input: UpdateProductInput,
    ) -> Result<products::Model, ProductError> {
        let txn = self.db.begin().await?;

        let product = products::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let name = input.name.as_deref().unwrap_or(&product.name);
        let price = input.price.unwrap_or(product.price);
        StockReconciler::validate_product(name, price)?;
        StockReconciler::validate_labels(
            input.category.as_ref().and_then(|v| v.as_deref()),
            input.sub_category.as_ref().and_then(|v| v.as_deref()),
            input.cosmetic_condition.as_ref().and_then(|v| v.as_deref()),
            input.working_condition.as_ref().and_then(|v| v.as_deref()),
        )?;

        let old_stock = to_u32(product.stock);

        let mut active: products::ActiveModel = product.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(specs) = input.specs {
            active.specs = Set(specs);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(new_stock) = input.stock {
            // Availability moves by a single conditional update so a
            // concurrent sale's decrement is never overwritten.
            let delta = StockReconciler::stock_edit_delta(old_stock, new_stock);
            Self::shift_availability(&txn, id.into_inner(), delta).await?;
            active.stock = Set(i32::try_from(new_stock).unwrap_or(i32::MAX));
            tracing::debug!(product_id = id.into_inner(), delta, "stock edited");
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(sub_category) = input.sub_category {
            active.sub_category = Set(sub_category);
        }
        if let Some(cosmetic_condition) = input.cosmetic_condition {
            active.cosmetic_condition = Set(cosmetic_condition);
        }
        if let Some(working_condition) = input.working_condition {
            active.working_condition = Set(working_condition);
        }
        if let Some(bought_from) = input.bought_from {
            active.bought_from = Set(bought_from);
        }
        if let Some(bought_at) = input.bought_at {
            active.bought_at = Set(bought_at);
        }
        if let Some(lot_id) = input.lot_id {
            active.lot_id = Set(lot_id);
        }
        active.updated_at = Set(Utc::now().into());

        active.update(&txn).await?;

        // Re-read so the returned row carries the shifted availability.
        let updated = products::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns `ReferencedBySales` while any sale row points at the
    /// product, `NotFound` if it does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        let sale_count = sales::Entity::find()
            .filter(sales::Column::ProductId.eq(id.into_inner()))
            .count(&self.db)
            .await?;

        if sale_count > 0 {
            return Err(ProductError::ReferencedBySales(id));
        }

        let result = products::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id.into_inner(), "product deleted");
        Ok(())
    }

    /// Stock-position overview: unsold products and this month's buys.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn overview(
        &self,
        now: chrono::NaiveDateTime,
    ) -> Result<ProductOverview, ProductError> {
        let unsold = products::Entity::find()
            .filter(products::Column::AvailableQuantity.gt(0))
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let month = ResolvedRange::from_keyword(DurationKeyword::CurrentMonth, now)
            .map_err(|e| DbErr::Custom(e.to_string()))?;
        let bought_this_month = products::Entity::find()
            .filter(products::Column::BoughtAt.gte(month.start))
            .filter(products::Column::BoughtAt.lte(month.end))
            .order_by_desc(products::Column::BoughtAt)
            .all(&self.db)
            .await?;

        Ok(ProductOverview {
            unsold_count: unsold.len(),
            unsold,
            bought_this_month,
        })
    }

    /// Sells units of a product in one step.
    ///
    /// Thin wrapper over sale creation for the quick-sell flow; all the
    /// stock guarding and cost snapshotting lives there.
    ///
    /// # Errors
    ///
    /// Returns the underlying sale creation error.
    pub async fn mark_as_sold(
        &self,
        id: ProductId,
        quantity: u32,
        sale_price: Decimal,
        customer: Option<String>,
        sale_date: chrono::NaiveDateTime,
    ) -> Result<crate::entities::sales::Model, crate::repositories::sale::SaleRepoError> {
        let sales = crate::repositories::sale::SaleRepository::new(self.db.clone());
        sales
            .create(crate::repositories::sale::CreateSaleInput {
                product_id: id,
                quantity_sold: quantity,
                sale_price,
                customer,
                sale_date,
            })
            .await
    }

    /// Atomically takes `quantity` units of availability.
    ///
    /// One conditional update; concurrent callers cannot oversell. Zero
    /// rows affected means the guard failed, and the current availability
    /// is re-read for the error payload.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` when the guard fails, `NotFound` when
    /// the product row is gone.
    pub(crate) async fn take_availability<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ProductError> {
        let qty = i32::try_from(quantity).unwrap_or(i32::MAX);
        let result = products::Entity::update_many()
            .col_expr(
                products::Column::AvailableQuantity,
                Expr::col(products::Column::AvailableQuantity).sub(qty),
            )
            .col_expr(
                products::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(products::Column::Id.eq(product_id))
            .filter(products::Column::AvailableQuantity.gte(qty))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            let product = products::Entity::find_by_id(product_id)
                .one(conn)
                .await?
                .ok_or(ProductError::NotFound(ProductId::from_i64(product_id)))?;
            return Err(InventoryError::InsufficientStock {
                available: to_u32(product.available_quantity),
                requested: quantity,
            }
            .into());
        }
        Ok(())
    }

    /// Atomically shifts availability by a signed delta, floored at zero.
    ///
    /// Stock edits go through here: the arithmetic happens in the update
    /// statement itself, so a concurrent sale committing between the
    /// caller's read and this write is still counted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the product row is gone.
    pub(crate) async fn shift_availability<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        delta: i64,
    ) -> Result<(), ProductError> {
        if delta == 0 {
            return Ok(());
        }
        let result = Self::shift_availability_stmt(product_id, delta)
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(ProductId::from_i64(product_id)));
        }
        Ok(())
    }

    fn shift_availability_stmt(
        product_id: i64,
        delta: i64,
    ) -> sea_orm::UpdateMany<products::Entity> {
        products::Entity::update_many()
            .col_expr(
                products::Column::AvailableQuantity,
                Expr::cust_with_values("GREATEST(available_quantity + ?, 0)", [delta]),
            )
            .col_expr(
                products::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(products::Column::Id.eq(product_id))
    }

    /// Atomically gives back `quantity` units of availability.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the product row is gone.
    pub(crate) async fn restore_availability<C: ConnectionTrait>(
        conn: &C,
        product_id: i64,
        quantity: u32,
    ) -> Result<(), ProductError> {
        let qty = i32::try_from(quantity).unwrap_or(i32::MAX);
        let result = products::Entity::update_many()
            .col_expr(
                products::Column::AvailableQuantity,
                Expr::col(products::Column::AvailableQuantity).add(qty),
            )
            .col_expr(
                products::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(products::Column::Id.eq(product_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(ProductId::from_i64(product_id)));
        }
        Ok(())
    }
}

impl From<ProductError> for relot_shared::AppError {
    fn from(err: ProductError) -> Self {
        let message = err.to_string();
        match err {
            ProductError::NotFound(_) => Self::NotFound(message),
            ProductError::ReferencedBySales(_) => Self::Conflict(message),
            ProductError::Invalid(InventoryError::InsufficientStock { .. }) => {
                Self::BusinessRule(message)
            }
            ProductError::Invalid(_) => Self::Validation(message),
            ProductError::Database(_) => Self::Database(message),
        }
    }
}

/// Column values are written from `u32` inputs, so this never truncates
/// in practice.
pub(crate) fn to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

#[cfg(test)]
#[path = "product_tests.rs"]
mod tests;
