//! Property tests for the sale repository's pure helpers.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::*;
use crate::entities::{sales, sea_orm_active_enums};

fn sale_model(quantity: i32, price_cents: i64, id: i64, product_id: i64) -> sales::Model {
    let sale_date = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let created = Utc::now().into();
    sales::Model {
        id,
        product_id,
        quantity_sold: quantity,
        sale_price: Decimal::new(price_cents, 2),
        unit_cost_at_sale: Decimal::new(price_cents, 2),
        customer: None,
        sale_date,
        shipping_status: sea_orm_active_enums::ShippingStatus::ShippingPending,
        is_refunded: false,
        refunded_at: None,
        created_at: created,
        updated_at: created,
    }
}

proptest! {
    #[test]
    fn prop_refund_expense_carries_both_references_and_full_amount(
        quantity in 1..10_000i32,
        price_cents in 1..10_000_000i64,
        id in 1..1_000_000i64,
        product_id in 1..1_000_000i64,
    ) {
        let sale = sale_model(quantity, price_cents, id, product_id);
        let expense = refund_expense(&sale, "body", "reason", sale.sale_date);

        prop_assert_eq!(expense.sale_id.clone().unwrap(), Some(id));
        prop_assert_eq!(expense.product_id.clone().unwrap(), Some(product_id));

        let units = u32::try_from(quantity).unwrap();
        prop_assert_eq!(
            expense.amount.clone().unwrap(),
            Decimal::from(units) * Decimal::new(price_cents, 2)
        );
    }

    #[test]
    fn prop_to_sale_record_preserves_money_and_floors_quantity(
        quantity in -100..10_000i32,
        price_cents in 1..10_000_000i64,
    ) {
        let sale = sale_model(quantity, price_cents, 1, 1);
        let record = to_sale_record(&sale);

        prop_assert_eq!(record.sale_price, sale.sale_price);
        prop_assert_eq!(record.unit_cost_at_sale, sale.unit_cost_at_sale);
        prop_assert_eq!(record.quantity_sold, u32::try_from(quantity.max(0)).unwrap());
    }
}
