//! Unit tests for lot and payment error mapping.

use relot_core::lot::LotError;
use relot_shared::{AppError, LotId};

use super::*;
use crate::repositories::payment::PaymentError;

#[test]
fn test_lot_errors_map_to_app_error() {
    let err: AppError = LotRepoError::NotFound(LotId::from_i64(4)).into();
    assert_eq!(err.status_code(), 404);

    let err: AppError = LotRepoError::ReferencedByProducts(LotId::from_i64(4)).into();
    assert_eq!(err.error_code(), "CONFLICT");

    let err: AppError = LotRepoError::Invalid(LotError::NonPositiveTotalPrice).into();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_payment_errors_map_to_app_error() {
    let err: AppError = PaymentError::LotNotFound(LotId::from_i64(4)).into();
    assert_eq!(err.status_code(), 404);

    let err: AppError = PaymentError::Invalid(LotError::NonPositiveAmount).into();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
