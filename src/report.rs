use crate::error::ReportError;
use chrono::Datelike;
use compliance::{
    ComplianceAssessment, ComplianceClassifier, OutlierDetector, OutlierFilter, OutlierRecord,
};
use configuration::AnalysisConfig;
use core_types::{AnnualAdjustment, AnnualValue, PriceChange, PriceQuote, RegulatedPrice};
use correlation::{CorrelationAnalyzer, CorrelationReport};
use elasticity::{ElasticityAnalyzer, ElasticityRecord, quartile_bands};
use projection::{ProjectionError, ProjectionRecord, Scenario, TrendProjector};
use rust_decimal::Decimal;
use serde::Serialize;
use statistics::{StatisticalSummary, StatisticsAggregator};
use std::collections::BTreeMap;
use taxes::TaxAdjustmentCalculator;

/// Everything the builder needs to analyze one entity.
///
/// The data-access collaborator supplies these collections; the builder
/// never fetches anything itself.
#[derive(Debug, Clone)]
pub struct AnalysisInputs<'a> {
    pub entity_id: &'a str,
    /// Price observations for the entity, ordered by date.
    pub quotes: &'a [PriceQuote],
    /// The official adjustment for the period under analysis.
    pub adjustment: &'a AnnualAdjustment,
    /// Annual exchange-rate variation series, for the correlation view.
    pub exchange_variation: &'a [AnnualValue],
    /// Growth scenario for the projection view.
    pub scenario: Scenario,
    /// CMED reference row for the entity, when one exists.
    pub regulated: Option<&'a RegulatedPrice>,
    /// Buyer's state, for grossing the reference price up by ICMS.
    pub state_code: Option<&'a str>,
}

/// The complete per-entity analysis handed to the reporting collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct FullAnalysis {
    pub entity_id: String,
    /// Descriptive statistics over the entity's quoted prices.
    pub price_summary: StatisticalSummary,
    /// Consecutive-observation price changes the other views derive from.
    pub changes: Vec<PriceChange>,
    /// Compliance judgment of the mean observed variation. `None` when the
    /// entity has no usable consecutive observations.
    pub compliance: Option<ComplianceAssessment>,
    /// Outlier records (both directions), largest deviation first.
    pub outliers: Vec<OutlierRecord>,
    /// Per-quartile-band elasticity against the official adjustment.
    pub elasticity: Vec<ElasticityRecord>,
    /// Historical plus projected annual prices under the chosen scenario.
    /// Empty when the history is too short to estimate a growth rate.
    pub projection: Vec<ProjectionRecord>,
    /// Annual price variation correlated against the exchange-rate series.
    pub exchange_correlation: CorrelationReport,
    /// Quoted prices checked against the regulatory ceiling. `None` when no
    /// CMED row or state was supplied.
    pub ceiling: Option<CeilingCheck>,
}

/// The regulatory ceiling for one entity in one state: the CMED
/// tax-exclusive price grossed up by that state's ICMS, compared against
/// the highest observed quote.
#[derive(Debug, Clone, Serialize)]
pub struct CeilingCheck {
    pub state_code: String,
    pub ceiling_price: Decimal,
    pub max_quoted_price: Decimal,
    pub above_ceiling: bool,
}

/// Assembles the full analysis for one entity from its raw inputs.
///
/// The builder wires the stateless component crates together; it holds only
/// configuration, so one instance can be shared freely across threads and
/// reused for any number of entities.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    aggregator: StatisticsAggregator,
    classifier: ComplianceClassifier,
    detector: OutlierDetector,
    elasticity: ElasticityAnalyzer,
    projector: TrendProjector,
    correlation: CorrelationAnalyzer,
    calculator: TaxAdjustmentCalculator,
}

impl ReportBuilder {
    /// Creates a builder from a validated configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self {
            aggregator: StatisticsAggregator::new(),
            classifier: ComplianceClassifier::new(config.compliance),
            detector: OutlierDetector::new(config.outliers),
            elasticity: ElasticityAnalyzer::new(config.elasticity),
            projector: TrendProjector::new(config.projection),
            correlation: CorrelationAnalyzer::new(config.correlation),
            calculator: TaxAdjustmentCalculator::new(),
        })
    }

    /// Builds the full analysis for one entity.
    pub fn build(&self, inputs: &AnalysisInputs<'_>) -> Result<FullAnalysis, ReportError> {
        tracing::debug!(
            "Building analysis for '{}' over {} quotes",
            inputs.entity_id,
            inputs.quotes.len()
        );

        // --- 1. Descriptive statistics over the quoted prices ---
        let prices: Vec<Decimal> = inputs.quotes.iter().map(|q| q.price).collect();
        let price_summary = self.aggregator.summarize(&prices);

        // --- 2. Consecutive price changes ---
        let changes = self.detector.price_changes(inputs.quotes);

        // --- 3. Compliance of the mean observed variation ---
        let adjustment_pct = inputs.adjustment.percentage;
        let compliance = if changes.is_empty() {
            None
        } else {
            let variations: Vec<Decimal> =
                changes.iter().map(|c| c.variation_percent).collect();
            let mean_variation = self.aggregator.summarize_signed(&variations).mean;
            Some(self.classifier.classify(mean_variation, adjustment_pct))
        };

        // --- 4. Outliers, largest deviation first ---
        let outliers = self.detector.rank_by_deviation(self.detector.detect(
            &changes,
            adjustment_pct,
            OutlierFilter::Both,
        ));

        // --- 5. Elasticity per quartile band ---
        let bands = quartile_bands(&changes);
        let elasticity = self.elasticity.analyze(&changes, &bands, adjustment_pct)?;

        // --- 6. Projection of the annual average price ---
        let history = self.annual_averages(inputs.quotes);
        let projection = match self.projector.project_default(&history, inputs.scenario) {
            Ok(records) => records,
            Err(ProjectionError::NotEnoughData(reason)) => {
                // Too little history is a data condition, not a caller bug;
                // the report still renders, just without this view.
                tracing::debug!(
                    "Skipping projection for '{}': {reason}",
                    inputs.entity_id
                );
                Vec::new()
            }
            Err(other) => return Err(other.into()),
        };

        // --- 7. Correlation against the exchange-rate series ---
        let variation_series = annual_variations(&history);
        let exchange_correlation = self
            .correlation
            .correlate(&variation_series, inputs.exchange_variation);

        // --- 8. Regulatory ceiling, when a CMED row and a state are known ---
        let ceiling = match (inputs.regulated, inputs.state_code) {
            (Some(regulated), Some(state_code)) => {
                let ceiling_price = self
                    .calculator
                    .gross_price_for_state(regulated.tax_exclusive_price, state_code)?;
                let max_quoted_price = price_summary.max;
                Some(CeilingCheck {
                    state_code: state_code.to_string(),
                    ceiling_price,
                    max_quoted_price,
                    above_ceiling: max_quoted_price > ceiling_price,
                })
            }
            _ => None,
        };

        Ok(FullAnalysis {
            entity_id: inputs.entity_id.to_string(),
            price_summary,
            changes,
            compliance,
            outliers,
            elasticity,
            projection,
            exchange_correlation,
            ceiling,
        })
    }

    /// Mean quoted price per calendar year, ordered by year.
    fn annual_averages(&self, quotes: &[PriceQuote]) -> Vec<AnnualValue> {
        let mut by_year: BTreeMap<i32, Vec<Decimal>> = BTreeMap::new();
        for quote in quotes {
            by_year
                .entry(quote.quote_date.year())
                .or_default()
                .push(quote.price);
        }

        by_year
            .into_iter()
            .filter_map(|(year, prices)| {
                let summary = self.aggregator.summarize(&prices);
                // A year whose every quote was filtered out has no average.
                (summary.count > 0).then(|| AnnualValue::new(year, summary.mean))
            })
            .collect()
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
            .expect("default analysis configuration is valid")
    }
}

/// Year-over-year variation of an already-sorted annual series.
fn annual_variations(history: &[AnnualValue]) -> Vec<AnnualValue> {
    history
        .windows(2)
        .filter_map(|pair| {
            if pair[0].value <= Decimal::ZERO {
                return None;
            }
            let variation =
                (pair[1].value - pair[0].value) / pair[0].value * Decimal::from(100);
            Some(AnnualValue::new(pair[1].year, variation))
        })
        .collect()
}
