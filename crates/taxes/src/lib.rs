//! # Vigia Tax Adjustment
//!
//! This crate converts the tax-exclusive factory price published by CMED
//! ("PF sem impostos") into the tax-inclusive gross price a buyer actually
//! pays in a given state, using the fixed ICMS state tax table.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on
//!   `core-types`.
//! - **Strict by default, lenient on request:** The strict API refuses
//!   invalid inputs with a `TaxError`; the legacy batch paths that expect a
//!   zero instead can call [`TaxAdjustmentCalculator::gross_price_or_zero`].

// Declare the modules that make up this crate.
pub mod calculator;
pub mod error;
pub mod states;

// Re-export the core types to provide a clean public API.
pub use calculator::TaxAdjustmentCalculator;
pub use error::TaxError;
pub use states::{all_states, icms_rate};
