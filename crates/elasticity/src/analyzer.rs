use crate::bands::PriceBand;
use crate::error::ElasticityError;
use configuration::ElasticityCutoffs;
use core_types::PriceChange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statistics::StatisticsAggregator;
use std::fmt;

/// Sensitivity class of a price band's reaction to the official adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sensitivity {
    Alta,
    Normal,
    Baixa,
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensitivity::Alta => write!(f, "Alta"),
            Sensitivity::Normal => write!(f, "Normal"),
            Sensitivity::Baixa => write!(f, "Baixa"),
        }
    }
}

/// The elasticity of one price band: how its mean observed variation
/// relates to the authorized adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityRecord {
    pub price_band: String,
    pub variation_percent: Decimal,
    pub adjustment_percent: Decimal,
    /// `variation / adjustment`, or `0` when the adjustment is zero (the
    /// ratio is undefined there; the zero `adjustment_percent` on the
    /// record marks that case).
    pub elasticity_ratio: Decimal,
    pub sensitivity: Sensitivity,
}

/// A stateless analyzer computing per-band elasticity ratios.
#[derive(Debug, Clone)]
pub struct ElasticityAnalyzer {
    cutoffs: ElasticityCutoffs,
}

impl ElasticityAnalyzer {
    pub fn new(cutoffs: ElasticityCutoffs) -> Self {
        Self { cutoffs }
    }

    /// Computes one `ElasticityRecord` per non-empty band.
    ///
    /// Changes are bucketed by the first band containing their previous
    /// price, the bucketed variations are summarized through the grouped
    /// aggregator, and each band's mean variation is turned into a ratio
    /// against the adjustment. Bands with no members produce no record;
    /// changes outside every band are skipped.
    pub fn analyze(
        &self,
        changes: &[PriceChange],
        bands: &[PriceBand],
        adjustment_percent: Decimal,
    ) -> Result<Vec<ElasticityRecord>, ElasticityError> {
        for band in bands {
            if band.label.trim().is_empty() {
                return Err(ElasticityError::InvalidBand(
                    "band label must not be empty".to_string(),
                ));
            }
        }

        let mut bucketed: Vec<(&str, Decimal)> = Vec::with_capacity(changes.len());
        for change in changes {
            match bands.iter().find(|b| b.contains(change.price_prev)) {
                Some(band) => bucketed.push((band.label.as_str(), change.variation_percent)),
                None => {
                    tracing::debug!(
                        "Change for '{}' (prev {}) falls outside every band",
                        change.entity_id,
                        change.price_prev
                    );
                }
            }
        }

        // Variations are signed: a band whose prices fell must keep its
        // negative entries in the mean.
        let aggregator = StatisticsAggregator::new();
        let groups = aggregator.summarize_grouped_signed(
            &bucketed,
            |(label, _)| label.to_string(),
            |(_, v)| *v,
        )?;

        // Re-emit in band order rather than the aggregator's count order.
        let mut records = Vec::new();
        for band in bands {
            let Some(group) = groups
                .iter()
                .find(|g| g.group_key.as_deref() == Some(band.label.as_str()))
            else {
                continue;
            };
            records.push(self.record_for(&band.label, group.mean, adjustment_percent));
        }
        Ok(records)
    }

    /// Builds the record for one band given its mean variation.
    fn record_for(
        &self,
        band_label: &str,
        variation_percent: Decimal,
        adjustment_percent: Decimal,
    ) -> ElasticityRecord {
        // Ratio is defined as 0 when the official adjustment is 0: keeps
        // the record present without dividing by zero.
        let elasticity_ratio = if adjustment_percent.is_zero() {
            Decimal::ZERO
        } else {
            variation_percent / adjustment_percent
        };

        ElasticityRecord {
            price_band: band_label.to_string(),
            variation_percent,
            adjustment_percent,
            elasticity_ratio,
            sensitivity: self.classify_ratio(elasticity_ratio),
        }
    }

    /// Classifies a ratio: strictly above the high cutoff is `Alta`,
    /// strictly below the low cutoff is `Baixa`, the closed band between
    /// them is `Normal`.
    pub fn classify_ratio(&self, ratio: Decimal) -> Sensitivity {
        if ratio > self.cutoffs.high_ratio {
            Sensitivity::Alta
        } else if ratio < self.cutoffs.low_ratio {
            Sensitivity::Baixa
        } else {
            Sensitivity::Normal
        }
    }
}

impl Default for ElasticityAnalyzer {
    fn default() -> Self {
        Self::new(ElasticityCutoffs::default())
    }
}
