//! Unit tests for the product repository's statements and error mapping.

use sea_orm::QueryTrait;
use sea_orm::sea_query::{PostgresQueryBuilder, QueryStatementWriter};

use relot_core::inventory::InventoryError;
use relot_shared::{AppError, ProductId};

use super::*;

#[test]
fn test_shift_availability_clamps_inside_the_statement() {
    // The arithmetic and the floor both live in the update itself, so
    // nothing read earlier in a transaction can be written back stale.
    let sql = ProductRepository::shift_availability_stmt(7, -3)
        .into_query()
        .to_string(PostgresQueryBuilder);
    assert!(sql.contains("GREATEST(available_quantity + -3, 0)"), "{sql}");
    assert!(sql.contains(r#""id" = 7"#), "{sql}");
}

#[test]
fn test_shift_availability_statement_handles_restocks() {
    let sql = ProductRepository::shift_availability_stmt(2, 5)
        .into_query()
        .to_string(PostgresQueryBuilder);
    assert!(sql.contains("GREATEST(available_quantity + 5, 0)"), "{sql}");
}

#[test]
fn test_errors_map_to_app_error() {
    let err: AppError = ProductError::NotFound(ProductId::from_i64(9)).into();
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(err.status_code(), 404);

    let err: AppError = ProductError::ReferencedBySales(ProductId::from_i64(9)).into();
    assert_eq!(err.status_code(), 409);

    let err: AppError = ProductError::Invalid(InventoryError::InsufficientStock {
        available: 1,
        requested: 2,
    })
    .into();
    assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");

    let err: AppError = ProductError::Invalid(InventoryError::EmptyName).into();
    assert_eq!(err.status_code(), 400);
}
