//! # Vigia
//!
//! Vigia is the Regulatory Price Compliance & Statistical Analysis Engine
//! behind a pharmaceutical distribution dashboard. It turns raw price-quote
//! time series and the government reference tables (CMED prices, annual
//! "reajuste" adjustments, the ICMS state tax table) into the statistical
//! summaries, compliance classifications, outlier flags, elasticity ratios,
//! projections and correlations the purchasing and regulatory views render.
//!
//! ## Architectural Principles
//!
//! - **Pure core:** Every crate in the workspace is a deterministic,
//!   stateless, synchronous library. Fetching data and rendering reports
//!   belong to external collaborators; nothing here performs I/O.
//! - **Layered workspace:** `core-types` and `configuration` at Layer 0,
//!   the analysis crates at Layer 1, and this facade on top as the single
//!   typed entry point for the reporting collaborator.
//! - **Lenient on data, strict on configuration:** dirty records are
//!   excluded with a warning so one bad row never aborts a report; unknown
//!   scenario names, state codes or filters are caller bugs and always
//!   surfaced.
//!
//! ## Public API
//!
//! - [`ReportBuilder`]: assembles a [`FullAnalysis`] for one entity.
//! - The component crates re-exported below, for callers that need a
//!   single computation instead of the whole report.

// Declare the modules that constitute this crate.
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use error::ReportError;
pub use report::{AnalysisInputs, CeilingCheck, FullAnalysis, ReportBuilder};

// Re-export the component crates for direct use.
pub use compliance::{
    ComplianceAssessment, ComplianceClassifier, ComplianceLevel, OutlierClass, OutlierDetector,
    OutlierFilter, OutlierRecord,
};
pub use configuration::AnalysisConfig;
pub use core_types::{
    AnnualAdjustment, AnnualValue, PriceChange, PriceQuote, QuoteSource, RawQuoteRow,
    RegulatedPrice, StateTaxRate,
};
pub use correlation::{CorrelationAnalyzer, CorrelationReport, CorrelationStrength};
pub use elasticity::{ElasticityAnalyzer, ElasticityRecord, PriceBand, Sensitivity};
pub use projection::{ProjectionRecord, Scenario, TrendProjector};
pub use statistics::{StatisticalSummary, StatisticsAggregator};
pub use taxes::TaxAdjustmentCalculator;
