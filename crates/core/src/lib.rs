//! Core business logic for Relot.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `inventory` - Product stock reconciliation rules
//! - `lot` - Purchase lot payment status tracking
//! - `sales` - Sale lifecycle rules (shipping status, refunds, stock charges)
//! - `expense` - Tagged expense kinds and reference validation
//! - `timerange` - Date-range resolution for reporting endpoints
//! - `analytics` - Revenue/COGS/profit aggregation

pub mod analytics;
pub mod expense;
pub mod inventory;
pub mod lot;
pub mod sales;
pub mod timerange;
