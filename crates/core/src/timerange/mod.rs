//! Date-range resolution for reporting endpoints.
//!
//! Callers pass either a duration keyword or explicit `YYYY-MM-DD` bounds;
//! both resolve to one canonical inclusive `[start, end]` pair. "Now" is an
//! explicit argument so resolution is deterministic under test.

pub mod error;
pub mod resolver;

pub use error::RangeError;
pub use resolver::{DurationKeyword, RangeQuery, ResolvedRange};
