use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Descriptive statistics over one collection of values.
///
/// This struct is the output of the `StatisticsAggregator` and the data
/// transfer object handed to the reporting collaborator. When produced by a
/// grouped aggregation, `group_key` identifies the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalSummary {
    pub mean: Decimal,
    pub median: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub count: usize,
    pub group_key: Option<String>,
}

impl StatisticalSummary {
    /// Creates the zero-valued summary.
    ///
    /// This is what an empty (or entirely filtered-out) input aggregates
    /// to, so batch reports render a row of zeros instead of failing.
    pub fn zeroed() -> Self {
        Self {
            mean: Decimal::ZERO,
            median: Decimal::ZERO,
            min: Decimal::ZERO,
            max: Decimal::ZERO,
            count: 0,
            group_key: None,
        }
    }
}

impl Default for StatisticalSummary {
    fn default() -> Self {
        Self::zeroed()
    }
}
