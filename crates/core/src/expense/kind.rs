//! Tagged expense kinds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use relot_shared::types::{ProductId, SaleId};

use super::error::ExpenseError;

/// Wire/storage tag for an expense kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseType {
    /// Repair or servicing cost for a specific product.
    Servicing,
    /// System-generated compensation for a refunded sale.
    Refund,
    /// Carrier cost, optionally tied to a sale.
    Shipping,
    /// Anything else.
    Misc,
}

impl ExpenseType {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Servicing => "servicing",
            Self::Refund => "refund",
            Self::Shipping => "shipping",
            Self::Misc => "misc",
        }
    }

    /// Parses an expense type from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidExpenseType` for unknown values.
    pub fn parse(value: &str) -> Result<Self, ExpenseError> {
        match value {
            "servicing" => Ok(Self::Servicing),
            "refund" => Ok(Self::Refund),
            "shipping" => Ok(Self::Shipping),
            "misc" => Ok(Self::Misc),
            other => Err(ExpenseError::InvalidExpenseType(other.to_string())),
        }
    }
}

/// An expense kind with its required references resolved.
///
/// The variants encode the reference rules: a refund always points at
/// both the refunded sale and its product, servicing always points at a
/// product, shipping may reference the sale it belongs to, and misc
/// stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseKind {
    /// Servicing cost for a product.
    Servicing {
        /// The product that was serviced.
        product_id: ProductId,
    },
    /// Refund compensation for a sale.
    Refund {
        /// The refunded sale.
        sale_id: SaleId,
        /// The product the sale was for.
        product_id: ProductId,
    },
    /// Shipping cost, optionally tied to a sale.
    Shipping {
        /// The sale being shipped, if known.
        sale_id: Option<SaleId>,
    },
    /// Uncategorized expense.
    Misc,
}

impl ExpenseKind {
    /// Builds a kind from the flat `(type, sale, product)` triple the
    /// collaborator submits, enforcing the per-kind reference rules.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::MissingReference` when a required reference
    /// is absent.
    pub const fn from_parts(
        expense_type: ExpenseType,
        sale_id: Option<SaleId>,
        product_id: Option<ProductId>,
    ) -> Result<Self, ExpenseError> {
        match expense_type {
            ExpenseType::Servicing => match product_id {
                Some(product_id) => Ok(Self::Servicing { product_id }),
                None => Err(ExpenseError::MissingReference {
                    expense_type: "servicing",
                    field: "product_id",
                }),
            },
            ExpenseType::Refund => match (sale_id, product_id) {
                (Some(sale_id), Some(product_id)) => Ok(Self::Refund {
                    sale_id,
                    product_id,
                }),
                (None, _) => Err(ExpenseError::MissingReference {
                    expense_type: "refund",
                    field: "sale_id",
                }),
                (_, None) => Err(ExpenseError::MissingReference {
                    expense_type: "refund",
                    field: "product_id",
                }),
            },
            ExpenseType::Shipping => Ok(Self::Shipping { sale_id }),
            ExpenseType::Misc => Ok(Self::Misc),
        }
    }

    /// The storage tag for this kind.
    #[must_use]
    pub const fn expense_type(&self) -> ExpenseType {
        match self {
            Self::Servicing { .. } => ExpenseType::Servicing,
            Self::Refund { .. } => ExpenseType::Refund,
            Self::Shipping { .. } => ExpenseType::Shipping,
            Self::Misc => ExpenseType::Misc,
        }
    }

    /// The referenced sale, if this kind carries one.
    #[must_use]
    pub const fn sale_id(&self) -> Option<SaleId> {
        match self {
            Self::Refund { sale_id, .. } => Some(*sale_id),
            Self::Shipping { sale_id } => *sale_id,
            Self::Servicing { .. } | Self::Misc => None,
        }
    }

    /// The referenced product, if this kind carries one.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Servicing { product_id } | Self::Refund { product_id, .. } => Some(*product_id),
            Self::Shipping { .. } | Self::Misc => None,
        }
    }

    /// Validates an expense amount.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NonPositiveAmount` for zero or negative
    /// amounts.
    pub fn validate_amount(amount: Decimal) -> Result<(), ExpenseError> {
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_type_round_trip() {
        for value in ["servicing", "refund", "shipping", "misc"] {
            assert_eq!(ExpenseType::parse(value).unwrap().as_str(), value);
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(matches!(
            ExpenseType::parse("marketing"),
            Err(ExpenseError::InvalidExpenseType(_))
        ));
    }

    #[test]
    fn test_refund_requires_sale_and_product() {
        let err = ExpenseKind::from_parts(ExpenseType::Refund, None, Some(ProductId(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::MissingReference {
                expense_type: "refund",
                field: "sale_id",
            }
        ));

        let err =
            ExpenseKind::from_parts(ExpenseType::Refund, Some(SaleId(9)), None).unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::MissingReference {
                expense_type: "refund",
                field: "product_id",
            }
        ));
    }

    #[test]
    fn test_refund_carries_both_references() {
        let kind =
            ExpenseKind::from_parts(ExpenseType::Refund, Some(SaleId(12)), Some(ProductId(3)))
                .unwrap();
        assert_eq!(kind.sale_id(), Some(SaleId(12)));
        assert_eq!(kind.product_id(), Some(ProductId(3)));
        assert_eq!(kind.expense_type(), ExpenseType::Refund);
    }

    #[test]
    fn test_servicing_requires_product() {
        let err = ExpenseKind::from_parts(ExpenseType::Servicing, Some(SaleId(9)), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::MissingReference {
                expense_type: "servicing",
                field: "product_id",
            }
        ));

        let kind =
            ExpenseKind::from_parts(ExpenseType::Servicing, None, Some(ProductId(4))).unwrap();
        assert_eq!(kind.product_id(), Some(ProductId(4)));
    }

    #[test]
    fn test_shipping_sale_is_optional() {
        let with = ExpenseKind::from_parts(ExpenseType::Shipping, Some(SaleId(2)), None).unwrap();
        assert_eq!(with.sale_id(), Some(SaleId(2)));

        let without = ExpenseKind::from_parts(ExpenseType::Shipping, None, None).unwrap();
        assert_eq!(without.sale_id(), None);
    }

    #[test]
    fn test_misc_stands_alone() {
        let kind = ExpenseKind::from_parts(ExpenseType::Misc, None, None).unwrap();
        assert_eq!(kind.sale_id(), None);
        assert_eq!(kind.product_id(), None);
    }

    #[test]
    fn test_validate_amount() {
        assert!(ExpenseKind::validate_amount(dec!(12.50)).is_ok());
        assert!(matches!(
            ExpenseKind::validate_amount(dec!(0)),
            Err(ExpenseError::NonPositiveAmount)
        ));
    }
}
