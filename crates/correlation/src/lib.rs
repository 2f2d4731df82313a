//! # Vigia Correlation
//!
//! This crate measures how two annual series move together, typically an
//! entity's price variation against the exchange-rate variation. Series are
//! aligned on the intersection of their years and the Pearson coefficient
//! is computed over the aligned pairs.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`
//!   and `configuration`.
//! - **Undefined is a value, not an error:** fewer than two aligned pairs
//!   (or a zero-variance side) yields `coefficient: None` in the report so
//!   batch reports still render. This crate has no error type.

// Declare the modules that make up this crate.
pub mod analyzer;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use analyzer::CorrelationAnalyzer;
pub use report::{AlignedPair, CorrelationReport, CorrelationStrength};
