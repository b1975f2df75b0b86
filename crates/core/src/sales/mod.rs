//! Sale lifecycle rules.
//!
//! This module implements the pure half of the sale lifecycle:
//! - Shipping status state machine
//! - Sale input validation
//! - Net availability charges for sale updates
//! - Refund guards, amounts, and descriptions

pub mod error;
pub mod lifecycle;
pub mod types;

#[cfg(test)]
mod lifecycle_props;

pub use error::SaleError;
pub use lifecycle::SaleLifecycle;
pub use types::{AvailabilityCharge, ShippingStatus};
