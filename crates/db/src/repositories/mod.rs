//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every mutating operation is a single transaction.

pub mod analytics;
pub mod expense;
pub mod lot;
pub mod payment;
pub mod product;
pub mod sale;

pub use analytics::{AnalyticsError, AnalyticsRepository};
pub use expense::{CreateExpenseInput, ExpenseRepoError, ExpenseRepository, ExpenseSummary};
pub use lot::{CreateLotInput, LotRepoError, LotRepository, LotWithTotalPaid, UpdateLotInput};
pub use payment::{CreatePaymentInput, PaymentError, PaymentRepository, UpdatePaymentInput};
pub use product::{
    CreateProductInput, ProductError, ProductOverview, ProductRepository, UpdateProductInput,
};
pub use sale::{
    CreateSaleInput, RefundOutcome, SaleRepoError, SaleRepository, ShippingInfoInput,
    UnshippedReport, UnshippedSale, UpdateSaleInput,
};
