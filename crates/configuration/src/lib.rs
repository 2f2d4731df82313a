//! # Vigia Configuration
//!
//! This crate defines the strongly-typed configuration for the analysis
//! engine: every compliance threshold, elasticity cutoff and projection
//! scenario offset lives here, with the documented regulatory defaults
//! baked into the `Default` implementations.
//!
//! The thresholds were inferred from the legacy dashboard's labeling rather
//! than from a documented business rule, so they are deliberately
//! configuration values instead of hard-coded constants: stakeholders can
//! revise them in `analysis.toml` without a code change.

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AnalysisConfig, ComplianceThresholds, CorrelationCutoffs, ElasticityCutoffs, OutlierSettings,
    ProjectionSettings,
};

/// Loads the analysis configuration from the `analysis.toml` file.
///
/// Every section is optional; missing sections fall back to the documented
/// defaults. The loaded configuration is validated before being returned,
/// so a caller never observes a config with inverted or negative
/// thresholds.
pub fn load_config() -> Result<AnalysisConfig, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `analysis.toml`
        .add_source(config::File::with_name("analysis").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `AnalysisConfig` struct
    let config = builder.try_deserialize::<AnalysisConfig>()?;
    config.validate()?;

    Ok(config)
}
