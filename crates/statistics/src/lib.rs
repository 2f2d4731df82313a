//! # Vigia Statistics Aggregator
//!
//! This crate provides the descriptive statistics every other analysis crate
//! builds on: mean, median, min, max and count over a collection of prices,
//! with grouping support for the dashboard's per-category breakdowns.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and no workspace dependencies.
//! - **Stateless Calculation:** The `StatisticsAggregator` holds no state.
//!   It takes a collection of values as input and produces a
//!   `StatisticalSummary` as output, which makes it trivially safe to call
//!   from concurrent report builds.
//! - **Lenient on dirty data:** Null, NaN and non-positive values are
//!   silently excluded before computing; an all-excluded input yields the
//!   zero summary, never an error.

// Declare the modules that constitute this crate.
pub mod aggregator;
pub mod error;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::{StatisticsAggregator, decimals_from_f64};
pub use error::StatisticsError;
pub use summary::StatisticalSummary;
