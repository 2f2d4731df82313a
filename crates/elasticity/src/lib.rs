//! # Vigia Elasticity
//!
//! This crate measures how sensitively each price band reacts to the
//! official annual adjustment: the elasticity ratio is the observed mean
//! variation of a band divided by the authorized adjustment. Bands whose
//! prices move well beyond the authorization are flagged "Alta"; bands
//! that barely move are "Baixa".
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`,
//!   `configuration` and `statistics`.
//! - **Sentinel over exception:** A zero official adjustment makes the
//!   ratio undefined; the record stays present with ratio `0` so batch
//!   reports still render (the zero `adjustment_percent` on the record
//!   marks the undefined case).

// Declare the modules that make up this crate.
pub mod analyzer;
pub mod bands;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use analyzer::{ElasticityAnalyzer, ElasticityRecord, Sensitivity};
pub use bands::{PriceBand, quartile_bands};
pub use error::ElasticityError;
