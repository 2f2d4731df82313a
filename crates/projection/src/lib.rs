//! # Vigia Trend Projection
//!
//! This crate extrapolates an entity's annual average price under named
//! growth scenarios: `medio` compounds the historical mean variation
//! forward, `otimista` and `pessimista` sit a configured spread below and
//! above it. The output interleaves the historical rows (tagged
//! `is_projected = false`) with the projected ones so the dashboard can
//! plot a single continuous series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`
//!   and `configuration`.
//! - **Unknown scenarios are caller bugs:** a scenario name outside the
//!   three known ones is surfaced as an error, never silently defaulted.

// Declare the modules that make up this crate.
pub mod error;
pub mod projector;
pub mod scenario;

// Re-export the core types to provide a clean public API.
pub use error::ProjectionError;
pub use projector::{ProjectionRecord, TrendProjector};
pub use scenario::Scenario;
