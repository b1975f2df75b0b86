//! Lot payment status derivation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LotError;

/// Payment status of a purchase lot.
///
/// Derived from the sum of recorded payments versus the agreed total;
/// never written directly by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotPaymentStatus {
    /// No payment received yet.
    PaymentPending,
    /// Some, but not all, of the agreed total received.
    PartiallyPaid,
    /// Payments cover the agreed total.
    Paid,
}

impl LotPaymentStatus {
    /// Returns the canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaymentPending => "payment_pending",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
        }
    }
}

/// Computes a lot's payment status from its payment total.
///
/// Missing payments are treated as a zero total, so this never fails:
/// - `paid` when `total_paid >= total_price`
/// - `payment_pending` when `total_paid == 0`
/// - `partially_paid` otherwise
#[must_use]
pub fn payment_status(total_paid: Decimal, total_price: Decimal) -> LotPaymentStatus {
    if total_paid >= total_price {
        LotPaymentStatus::Paid
    } else if total_paid.is_zero() {
        LotPaymentStatus::PaymentPending
    } else {
        LotPaymentStatus::PartiallyPaid
    }
}

/// Validation rules for lot and payment writes.
pub struct LotTracker;

impl LotTracker {
    /// Validates lot creation input.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is blank or the total price
    /// is not strictly positive.
    pub fn validate_lot(title: &str, total_price: Decimal) -> Result<(), LotError> {
        if title.trim().is_empty() {
            return Err(LotError::EmptyTitle);
        }
        if total_price <= Decimal::ZERO {
            return Err(LotError::NonPositiveTotalPrice);
        }
        Ok(())
    }

    /// Validates a payment amount.
    ///
    /// # Errors
    ///
    /// Returns `LotError::NonPositiveAmount` for zero or negative amounts.
    pub fn validate_payment(amount: Decimal) -> Result<(), LotError> {
        if amount <= Decimal::ZERO {
            return Err(LotError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_payments_is_pending() {
        assert_eq!(
            payment_status(dec!(0), dec!(500.00)),
            LotPaymentStatus::PaymentPending
        );
    }

    #[test]
    fn test_partial_payments() {
        // Lot(total_price=500.00) with payments [200.00, 150.00]
        let total_paid = dec!(200.00) + dec!(150.00);
        assert_eq!(total_paid, dec!(350.00));
        assert_eq!(
            payment_status(total_paid, dec!(500.00)),
            LotPaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_exact_total_is_paid() {
        // Adding Payment(150.00) on top of 350.00 reaches the total
        let total_paid = dec!(350.00) + dec!(150.00);
        assert_eq!(
            payment_status(total_paid, dec!(500.00)),
            LotPaymentStatus::Paid
        );
    }

    #[test]
    fn test_overpayment_is_paid() {
        assert_eq!(
            payment_status(dec!(600.00), dec!(500.00)),
            LotPaymentStatus::Paid
        );
    }

    #[test]
    fn test_status_string_forms() {
        assert_eq!(LotPaymentStatus::PaymentPending.as_str(), "payment_pending");
        assert_eq!(LotPaymentStatus::PartiallyPaid.as_str(), "partially_paid");
        assert_eq!(LotPaymentStatus::Paid.as_str(), "paid");
    }

    #[test]
    fn test_validate_lot() {
        assert!(LotTracker::validate_lot("Estate sale batch", dec!(500)).is_ok());
        assert!(matches!(
            LotTracker::validate_lot("", dec!(500)),
            Err(LotError::EmptyTitle)
        ));
        assert!(matches!(
            LotTracker::validate_lot("Estate sale batch", dec!(0)),
            Err(LotError::NonPositiveTotalPrice)
        ));
    }

    #[test]
    fn test_validate_payment() {
        assert!(LotTracker::validate_payment(dec!(0.01)).is_ok());
        assert!(matches!(
            LotTracker::validate_payment(dec!(0)),
            Err(LotError::NonPositiveAmount)
        ));
        assert!(matches!(
            LotTracker::validate_payment(dec!(-5)),
            Err(LotError::NonPositiveAmount)
        ));
    }
}
