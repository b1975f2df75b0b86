//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `SaleId` where a
//! `ProductId` is expected. All entities use database-assigned `BIGSERIAL`
//! keys, so IDs wrap `i64` and are never generated in-process.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw database key.
            #[must_use]
            pub const fn from_i64(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(LotId, "Unique identifier for a purchase lot.");
typed_id!(PaymentId, "Unique identifier for a lot payment.");
typed_id!(SaleId, "Unique identifier for a sale.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(ShippingInfoId, "Unique identifier for a sale's shipping info.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_ids_are_distinct_types() {
        let product = ProductId::from_i64(1);
        let sale = SaleId::from_i64(1);
        assert_eq!(product.into_inner(), sale.into_inner());
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        let id = LotId::from_i64(42);
        let parsed: LotId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_serde_transparent() {
        let id = SaleId::from_i64(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: SaleId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<ProductId>().is_err());
    }
}
