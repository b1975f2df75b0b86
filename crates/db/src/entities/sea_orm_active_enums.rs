//! Postgres enum mappings.
//!
//! Each database enum mirrors a pure enum in `relot-core`; conversions in
//! both directions keep the repositories free of string matching.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Derived payment state of a purchase lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lot_payment_status")]
pub enum LotPaymentStatus {
    /// No payment recorded.
    #[sea_orm(string_value = "payment_pending")]
    PaymentPending,
    /// Payments recorded but short of the agreed total.
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    /// Payments cover the agreed total.
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<relot_core::lot::LotPaymentStatus> for LotPaymentStatus {
    fn from(status: relot_core::lot::LotPaymentStatus) -> Self {
        match status {
            relot_core::lot::LotPaymentStatus::PaymentPending => Self::PaymentPending,
            relot_core::lot::LotPaymentStatus::PartiallyPaid => Self::PartiallyPaid,
            relot_core::lot::LotPaymentStatus::Paid => Self::Paid,
        }
    }
}

impl From<LotPaymentStatus> for relot_core::lot::LotPaymentStatus {
    fn from(status: LotPaymentStatus) -> Self {
        match status {
            LotPaymentStatus::PaymentPending => Self::PaymentPending,
            LotPaymentStatus::PartiallyPaid => Self::PartiallyPaid,
            LotPaymentStatus::Paid => Self::Paid,
        }
    }
}

/// Fulfilment state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "shipping_status")]
pub enum ShippingStatus {
    /// Sold but not yet handed to a carrier.
    #[sea_orm(string_value = "shipping_pending")]
    ShippingPending,
    /// Shipment booked with a carrier.
    #[sea_orm(string_value = "shipping_placed")]
    ShippingPlaced,
    /// Handed over and on its way.
    #[sea_orm(string_value = "shipped")]
    Shipped,
}

impl From<relot_core::sales::ShippingStatus> for ShippingStatus {
    fn from(status: relot_core::sales::ShippingStatus) -> Self {
        match status {
            relot_core::sales::ShippingStatus::ShippingPending => Self::ShippingPending,
            relot_core::sales::ShippingStatus::ShippingPlaced => Self::ShippingPlaced,
            relot_core::sales::ShippingStatus::Shipped => Self::Shipped,
        }
    }
}

impl From<ShippingStatus> for relot_core::sales::ShippingStatus {
    fn from(status: ShippingStatus) -> Self {
        match status {
            ShippingStatus::ShippingPending => Self::ShippingPending,
            ShippingStatus::ShippingPlaced => Self::ShippingPlaced,
            ShippingStatus::Shipped => Self::Shipped,
        }
    }
}

/// Category tag on an expense row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_type")]
pub enum ExpenseType {
    /// Repair or maintenance of a product.
    #[sea_orm(string_value = "servicing")]
    Servicing,
    /// Money returned for a refunded sale.
    #[sea_orm(string_value = "refund")]
    Refund,
    /// Carrier cost for an outgoing shipment.
    #[sea_orm(string_value = "shipping")]
    Shipping,
    /// Anything else.
    #[sea_orm(string_value = "misc")]
    Misc,
}

impl From<relot_core::expense::ExpenseType> for ExpenseType {
    fn from(kind: relot_core::expense::ExpenseType) -> Self {
        match kind {
            relot_core::expense::ExpenseType::Servicing => Self::Servicing,
            relot_core::expense::ExpenseType::Refund => Self::Refund,
            relot_core::expense::ExpenseType::Shipping => Self::Shipping,
            relot_core::expense::ExpenseType::Misc => Self::Misc,
        }
    }
}

impl From<ExpenseType> for relot_core::expense::ExpenseType {
    fn from(kind: ExpenseType) -> Self {
        match kind {
            ExpenseType::Servicing => Self::Servicing,
            ExpenseType::Refund => Self::Refund,
            ExpenseType::Shipping => Self::Shipping,
            ExpenseType::Misc => Self::Misc,
        }
    }
}
