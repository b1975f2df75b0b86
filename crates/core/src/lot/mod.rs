//! Purchase lot payment status tracking.
//!
//! A lot's `status` is a pure function of the payments recorded against it;
//! it is recomputed after every payment write and never set directly.

pub mod error;
pub mod status;

#[cfg(test)]
mod status_props;

pub use error::LotError;
pub use status::{payment_status, LotPaymentStatus, LotTracker};
