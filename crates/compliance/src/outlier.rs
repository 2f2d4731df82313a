use crate::error::ComplianceError;
use configuration::OutlierSettings;
use core_types::{PriceChange, PriceQuote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Direction of an outlier relative to the official adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierClass {
    Positive,
    Negative,
    Normal,
}

impl fmt::Display for OutlierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierClass::Positive => write!(f, "positivo"),
            OutlierClass::Negative => write!(f, "negativo"),
            OutlierClass::Normal => write!(f, "normal"),
        }
    }
}

/// Which outlier directions a detection run should return.
///
/// Parsed from the legacy request strings; anything else is a caller bug
/// and is surfaced as [`ComplianceError::InvalidFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierFilter {
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "negativo")]
    Negative,
    #[serde(rename = "ambos")]
    Both,
}

impl FromStr for OutlierFilter {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positivo" => Ok(OutlierFilter::Positive),
            "negativo" => Ok(OutlierFilter::Negative),
            "ambos" => Ok(OutlierFilter::Both),
            other => Err(ComplianceError::InvalidFilter(other.to_string())),
        }
    }
}

impl OutlierFilter {
    fn accepts(&self, class: OutlierClass) -> bool {
        match self {
            OutlierFilter::Positive => class == OutlierClass::Positive,
            OutlierFilter::Negative => class == OutlierClass::Negative,
            OutlierFilter::Both => class != OutlierClass::Normal,
        }
    }
}

/// One flagged price-change record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub entity_id: String,
    pub variation_percent: Decimal,
    pub adjustment_percent: Decimal,
    pub deviation: Decimal,
    pub classification: OutlierClass,
}

/// A stateless detector flagging price changes whose deviation from the
/// official adjustment exceeds the configured threshold.
#[derive(Debug, Clone)]
pub struct OutlierDetector {
    settings: OutlierSettings,
}

impl OutlierDetector {
    pub fn new(settings: OutlierSettings) -> Self {
        Self { settings }
    }

    /// Pairs consecutive price observations per entity into `PriceChange`
    /// records.
    ///
    /// Quotes are expected ordered by date within each entity (the order
    /// the data-access layer delivers them in). Pairs whose previous price
    /// is not strictly positive are excluded with a `warn`: the variation
    /// is undefined there, and one dirty pair must not abort the run.
    pub fn price_changes(&self, quotes: &[PriceQuote]) -> Vec<PriceChange> {
        let mut by_entity: HashMap<&str, Vec<&PriceQuote>> = HashMap::new();
        let mut entity_order: Vec<&str> = Vec::new();
        for quote in quotes {
            let series = by_entity.entry(quote.entity_id.as_str()).or_default();
            if series.is_empty() {
                entity_order.push(quote.entity_id.as_str());
            }
            series.push(quote);
        }

        let mut changes = Vec::new();
        for entity_id in entity_order {
            for pair in by_entity[entity_id].windows(2) {
                match PriceChange::new(entity_id, pair[0].price, pair[1].price) {
                    Ok(change) => changes.push(change),
                    Err(err) => {
                        tracing::warn!("Excluding price pair for '{entity_id}': {err}");
                    }
                }
            }
        }
        changes
    }

    /// Classifies every change against the adjustment, keeping only the
    /// directions the filter asks for.
    pub fn detect(
        &self,
        changes: &[PriceChange],
        adjustment_percent: Decimal,
        filter: OutlierFilter,
    ) -> Vec<OutlierRecord> {
        changes
            .iter()
            .map(|change| self.classify_change(change, adjustment_percent))
            .filter(|record| filter.accepts(record.classification))
            .collect()
    }

    /// Classifies a single change without filtering.
    pub fn classify_change(
        &self,
        change: &PriceChange,
        adjustment_percent: Decimal,
    ) -> OutlierRecord {
        let deviation = change.deviation_from(adjustment_percent);
        let threshold = self.settings.threshold_pct;

        let classification = if deviation > threshold {
            OutlierClass::Positive
        } else if deviation < -threshold {
            OutlierClass::Negative
        } else {
            OutlierClass::Normal
        };

        OutlierRecord {
            entity_id: change.entity_id.clone(),
            variation_percent: change.variation_percent,
            adjustment_percent,
            deviation,
            classification,
        }
    }

    /// Orders records by absolute deviation, largest first, for the
    /// dashboard's "top offenders" listing.
    pub fn rank_by_deviation(&self, mut records: Vec<OutlierRecord>) -> Vec<OutlierRecord> {
        records.sort_by(|a, b| {
            b.deviation
                .abs()
                .partial_cmp(&a.deviation.abs())
                .unwrap_or(Ordering::Equal)
        });
        records
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(OutlierSettings::default())
    }
}
