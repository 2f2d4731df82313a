//! # Vigia Compliance
//!
//! This crate judges observed price variations against the officially
//! authorized annual adjustment ("reajuste"). It provides two views of the
//! same deviation:
//!
//! - The [`ComplianceClassifier`] buckets a deviation into the severity
//!   classes the dashboard displays ("Muito Acima" through "Muito Abaixo").
//! - The [`OutlierDetector`] flags individual price-change records whose
//!   deviation exceeds a configured threshold, with a direction filter.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate depending only on `core-types`,
//!   `configuration` and `statistics`.
//! - **Stateless Calculation:** Both components are constructed from their
//!   configured thresholds and hold no other state; every call is a one-shot
//!   transformation.

// Declare all the modules that constitute this crate.
pub mod classifier;
pub mod error;
pub mod outlier;

// Re-export the key components to create a clean, public-facing API.
pub use classifier::{ComplianceAssessment, ComplianceClassifier, ComplianceLevel};
pub use error::ComplianceError;
pub use outlier::{OutlierClass, OutlierDetector, OutlierFilter, OutlierRecord};
