//! # Vigia Core Types
//!
//! This crate defines the foundational data structures shared by every other
//! crate in the workspace: the raw observations fetched by the data-access
//! layer (price quotes, CMED reference rows, annual adjustments, the ICMS
//! state table) and the validated records derived from them.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate depends on no other workspace crate. Everything
//!   else depends on it.
//! - **Typed at the boundary:** Rows arriving from the dynamically shaped RPC
//!   layer enter through [`RawQuoteRow::validate`], which rejects malformed
//!   values instead of silently coercing them.
//! - **Exact arithmetic:** All prices and percentages are `rust_decimal`
//!   values, never floats.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::QuoteSource;
pub use error::CoreError;
pub use structs::{
    AnnualAdjustment, AnnualValue, PriceChange, PriceQuote, RawQuoteRow, RegulatedPrice,
    StateTaxRate, validate_batch,
};
