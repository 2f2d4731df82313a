use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the analysis engine.
///
/// Every section can be omitted from `analysis.toml`; the defaults carry the
/// thresholds the legacy dashboard used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub compliance: ComplianceThresholds,
    #[serde(default)]
    pub outliers: OutlierSettings,
    #[serde(default)]
    pub elasticity: ElasticityCutoffs,
    #[serde(default)]
    pub projection: ProjectionSettings,
    #[serde(default)]
    pub correlation: CorrelationCutoffs,
}

/// Deviation edges for the compliance classification buckets.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceThresholds {
    /// Deviations beyond this many percentage points are "Muito Acima" /
    /// "Muito Abaixo".
    pub far_deviation_pct: Decimal,
    /// Deviations beyond this many percentage points (but within the far
    /// edge) are "Acima" / "Abaixo".
    pub near_deviation_pct: Decimal,
}

/// Settings for the outlier detector.
#[derive(Debug, Clone, Deserialize)]
pub struct OutlierSettings {
    /// A record is an outlier when its deviation from the official
    /// adjustment exceeds this many percentage points in either direction.
    pub threshold_pct: Decimal,
}

/// Elasticity-ratio cutoffs for the sensitivity classification.
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticityCutoffs {
    /// Ratios strictly above this are "Alta".
    pub high_ratio: Decimal,
    /// Ratios strictly below this are "Baixa"; the closed band in between
    /// is "Normal".
    pub low_ratio: Decimal,
}

/// Settings for the trend projector's named scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionSettings {
    /// How far, in percentage points, the otimista/pessimista scenarios sit
    /// from the historical mean growth rate.
    pub scenario_spread_pct: Decimal,
    /// Horizon used when the caller does not ask for a specific one.
    pub default_horizon_years: u32,
}

/// Pearson-coefficient cutoffs for the correlation strength labels.
#[derive(Debug, Clone, Deserialize)]
pub struct CorrelationCutoffs {
    /// |r| strictly above this is "Alta".
    pub strong: f64,
    /// |r| strictly above this (but not above `strong`) is "Média".
    pub moderate: f64,
}

// --- Default Implementations ---
// These carry the thresholds inferred from the legacy dashboard, so the
// engine is usable as a plain library without any configuration file.

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            far_deviation_pct: dec!(2),
            near_deviation_pct: dec!(0.5),
        }
    }
}

impl Default for OutlierSettings {
    fn default() -> Self {
        Self {
            threshold_pct: dec!(2),
        }
    }
}

impl Default for ElasticityCutoffs {
    fn default() -> Self {
        Self {
            high_ratio: dec!(1.2),
            low_ratio: dec!(0.8),
        }
    }
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            scenario_spread_pct: dec!(2),
            default_horizon_years: 5,
        }
    }
}

impl Default for CorrelationCutoffs {
    fn default() -> Self {
        Self {
            strong: 0.7,
            moderate: 0.3,
        }
    }
}

impl AnalysisConfig {
    /// Checks that the loaded thresholds are logically consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compliance.near_deviation_pct <= Decimal::ZERO
            || self.compliance.far_deviation_pct <= self.compliance.near_deviation_pct
        {
            return Err(ConfigError::ValidationError(
                "compliance thresholds must satisfy 0 < near < far".to_string(),
            ));
        }
        if self.outliers.threshold_pct <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "outlier threshold must be greater than 0".to_string(),
            ));
        }
        if self.elasticity.low_ratio <= Decimal::ZERO
            || self.elasticity.high_ratio <= self.elasticity.low_ratio
        {
            return Err(ConfigError::ValidationError(
                "elasticity cutoffs must satisfy 0 < low < high".to_string(),
            ));
        }
        if self.projection.scenario_spread_pct < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "scenario spread must not be negative".to_string(),
            ));
        }
        if self.projection.default_horizon_years == 0 {
            return Err(ConfigError::ValidationError(
                "projection horizon must be at least 1 year".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.correlation.strong)
            || !(0.0..=1.0).contains(&self.correlation.moderate)
            || self.correlation.strong <= self.correlation.moderate
        {
            return Err(ConfigError::ValidationError(
                "correlation cutoffs must satisfy 0 <= moderate < strong <= 1".to_string(),
            ));
        }
        Ok(())
    }
}
