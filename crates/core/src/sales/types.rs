//! Sale domain types.

use relot_shared::types::ProductId;
use serde::{Deserialize, Serialize};

use super::error::SaleError;

/// Lifecycle stage of physically dispatching a sold item.
///
/// New sales start as `shipping_pending`; the only mutation path is the
/// explicit status-update operation, which validates the target value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    /// Sold but not yet handed to a carrier.
    #[default]
    ShippingPending,
    /// Shipment booked with a carrier.
    ShippingPlaced,
    /// Handed over and on its way.
    Shipped,
}

impl ShippingStatus {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShippingPending => "shipping_pending",
            Self::ShippingPlaced => "shipping_placed",
            Self::Shipped => "shipped",
        }
    }

    /// Parses a shipping status from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `SaleError::InvalidStatus` for anything but the three known
    /// values.
    pub fn parse(value: &str) -> Result<Self, SaleError> {
        match value {
            "shipping_pending" => Ok(Self::ShippingPending),
            "shipping_placed" => Ok(Self::ShippingPlaced),
            "shipped" => Ok(Self::Shipped),
            other => Err(SaleError::InvalidStatus(other.to_string())),
        }
    }
}

/// A signed availability delta to apply to one product.
///
/// Negative deltas are stock charges and must be applied with the guarded
/// conditional decrement; positive deltas are restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityCharge {
    /// Product whose availability changes.
    pub product_id: ProductId,
    /// Signed change to `available_quantity`.
    pub delta: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(
            ShippingStatus::parse("shipping_pending").unwrap(),
            ShippingStatus::ShippingPending
        );
        assert_eq!(
            ShippingStatus::parse("shipping_placed").unwrap(),
            ShippingStatus::ShippingPlaced
        );
        assert_eq!(ShippingStatus::parse("shipped").unwrap(), ShippingStatus::Shipped);
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let err = ShippingStatus::parse("delivered").unwrap_err();
        assert!(matches!(err, SaleError::InvalidStatus(ref v) if v == "delivered"));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(ShippingStatus::default(), ShippingStatus::ShippingPending);
    }
}
