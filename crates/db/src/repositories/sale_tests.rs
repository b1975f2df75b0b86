//! Unit tests for the pure mapping helpers of the sale repository.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use relot_core::inventory::InventoryError;
use relot_shared::ProductId;

use super::*;
use crate::entities::{sales, sea_orm_active_enums};
use crate::repositories::product::{to_u32, ProductError};

fn sample_sale() -> sales::Model {
    let sale_date = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap();
    let created = chrono::Utc::now().into();
    sales::Model {
        id: 12,
        product_id: 3,
        quantity_sold: 3,
        sale_price: dec!(120.00),
        unit_cost_at_sale: dec!(100.00),
        customer: Some("Ana".to_string()),
        sale_date,
        shipping_status: sea_orm_active_enums::ShippingStatus::ShippingPending,
        is_refunded: false,
        refunded_at: None,
        created_at: created,
        updated_at: created,
    }
}

#[test]
fn test_to_sale_record_carries_cost_snapshot() {
    let record = to_sale_record(&sample_sale());
    assert_eq!(record.quantity_sold, 3);
    assert_eq!(record.sale_price, dec!(120.00));
    assert_eq!(record.unit_cost_at_sale, dec!(100.00));
    assert_eq!(record.sale_date, sample_sale().sale_date);
}

#[test]
fn test_product_error_maps_to_sale_error() {
    let err: SaleRepoError = ProductError::NotFound(ProductId::from_i64(9)).into();
    assert!(matches!(
        err,
        SaleRepoError::ProductNotFound(id) if id == ProductId::from_i64(9)
    ));

    let stock = ProductError::Invalid(InventoryError::InsufficientStock {
        available: 2,
        requested: 5,
    });
    let err: SaleRepoError = stock.into();
    assert!(matches!(
        err,
        SaleRepoError::Stock(InventoryError::InsufficientStock {
            available: 2,
            requested: 5,
        })
    ));
}

#[test]
fn test_to_u32_floors_negative_values() {
    assert_eq!(to_u32(5), 5);
    assert_eq!(to_u32(0), 0);
    assert_eq!(to_u32(-1), 0);
}

#[test]
fn test_shipping_status_round_trips_through_db_enum() {
    use relot_core::sales::ShippingStatus as Core;
    for core in [Core::ShippingPending, Core::ShippingPlaced, Core::Shipped] {
        let db: sea_orm_active_enums::ShippingStatus = core.into();
        let back: Core = db.into();
        assert_eq!(back, core);
    }
}

#[test]
fn test_refund_expense_references_sale_and_product() {
    let sale = sample_sale();
    let now = NaiveDate::from_ymd_opt(2025, 3, 12)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let expense = refund_expense(&sale, "Nikon FM2", "defective", now);

    assert_eq!(expense.sale_id.clone().unwrap(), Some(12));
    assert_eq!(expense.product_id.clone().unwrap(), Some(3));
    assert_eq!(expense.amount.clone().unwrap(), dec!(360.00));
    assert_eq!(expense.date.clone().unwrap(), now.date());
    assert_eq!(
        expense.expense_type.clone().unwrap(),
        sea_orm_active_enums::ExpenseType::Refund
    );
}

#[test]
fn test_sale_errors_map_to_app_error() {
    use relot_core::sales::SaleError;
    use relot_shared::{AppError, SaleId};

    let err: AppError = SaleRepoError::NotFound(SaleId::from_i64(1)).into();
    assert_eq!(err.status_code(), 404);

    let err: AppError = SaleRepoError::Invalid(SaleError::AlreadyRefunded).into();
    assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");

    let err: AppError = SaleRepoError::Stock(InventoryError::InsufficientStock {
        available: 0,
        requested: 1,
    })
    .into();
    assert_eq!(err.status_code(), 422);

    let err: AppError = SaleRepoError::Invalid(SaleError::NonPositivePrice).into();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_refund_description_embeds_context() {
    use relot_core::sales::SaleLifecycle;
    use relot_shared::SaleId;
    let description =
        SaleLifecycle::refund_description(SaleId::from_i64(12), "Nikon FM2", "defective");
    assert_eq!(description, "Refund for sale #12 (Nikon FM2): defective");
}
