use crate::error::ProjectionError;
use crate::scenario::Scenario;
use configuration::ProjectionSettings;
use core_types::AnnualValue;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One row of a projected price series. Historical rows carry
/// `is_projected = false`; extrapolated rows carry `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub year: i32,
    pub projected_price: Decimal,
    pub variation_percent: Decimal,
    /// Accumulated impact relative to the base (last historical) year.
    /// Zero on every historical row.
    pub cumulative_impact_percent: Decimal,
    pub is_projected: bool,
}

/// A stateless projector compounding annual prices forward under a named
/// scenario.
#[derive(Debug, Clone)]
pub struct TrendProjector {
    settings: ProjectionSettings,
}

impl TrendProjector {
    pub fn new(settings: ProjectionSettings) -> Self {
        Self { settings }
    }

    /// Resolves the growth rate a scenario implies for the given history.
    ///
    /// `Medio` is the mean of the historical year-over-year variations;
    /// the other scenarios sit the configured spread below/above it. Pairs
    /// with a non-positive earlier price are excluded (their variation is
    /// undefined); at least one usable pair must remain.
    pub fn growth_rate(
        &self,
        history: &[AnnualValue],
        scenario: Scenario,
    ) -> Result<Decimal, ProjectionError> {
        let mut rows = history.to_vec();
        rows.sort_by_key(|r| r.year);

        let mut variations = Vec::new();
        for pair in rows.windows(2) {
            if pair[0].value <= Decimal::ZERO {
                tracing::warn!(
                    "Excluding year {} from growth estimation: non-positive price {}",
                    pair[0].year,
                    pair[0].value
                );
                continue;
            }
            variations.push((pair[1].value - pair[0].value) / pair[0].value * dec!(100));
        }

        if variations.is_empty() {
            return Err(ProjectionError::NotEnoughData(
                "at least two usable annual prices are required".to_string(),
            ));
        }

        let mean: Decimal =
            variations.iter().sum::<Decimal>() / Decimal::from(variations.len());

        let rate = match scenario {
            Scenario::Medio => mean,
            Scenario::Otimista => mean - self.settings.scenario_spread_pct,
            Scenario::Pessimista => mean + self.settings.scenario_spread_pct,
        };
        Ok(rate)
    }

    /// Projects the series under the given scenario.
    pub fn project(
        &self,
        history: &[AnnualValue],
        scenario: Scenario,
        years: u32,
    ) -> Result<Vec<ProjectionRecord>, ProjectionError> {
        let growth_pct = self.growth_rate(history, scenario)?;
        self.project_with_rate(history, growth_pct, years)
    }

    /// Projects the series under the default horizon from configuration.
    pub fn project_default(
        &self,
        history: &[AnnualValue],
        scenario: Scenario,
    ) -> Result<Vec<ProjectionRecord>, ProjectionError> {
        self.project(history, scenario, self.settings.default_horizon_years)
    }

    /// Compounds the last historical price forward by a fixed annual rate.
    ///
    /// Emits every historical row first (actual year-over-year variation,
    /// zero cumulative impact, `is_projected = false`), then `years`
    /// projected rows where each price is the previous one grown by
    /// `growth_pct` and the cumulative impact is measured against the base
    /// (last historical) price.
    pub fn project_with_rate(
        &self,
        history: &[AnnualValue],
        growth_pct: Decimal,
        years: u32,
    ) -> Result<Vec<ProjectionRecord>, ProjectionError> {
        let mut rows = history.to_vec();
        rows.sort_by_key(|r| r.year);
        let Some(base) = rows.last().copied() else {
            return Err(ProjectionError::NotEnoughData(
                "history must contain at least the base year".to_string(),
            ));
        };

        let mut records = Vec::with_capacity(rows.len() + years as usize);
        let mut prev_price: Option<Decimal> = None;
        for row in &rows {
            let variation = match prev_price {
                Some(prev) if prev > Decimal::ZERO => {
                    (row.value - prev) / prev * dec!(100)
                }
                _ => Decimal::ZERO,
            };
            records.push(ProjectionRecord {
                year: row.year,
                projected_price: row.value,
                variation_percent: variation,
                cumulative_impact_percent: Decimal::ZERO,
                is_projected: false,
            });
            prev_price = Some(row.value);
        }

        let growth_factor = Decimal::ONE + growth_pct / dec!(100);
        let mut price = base.value;
        for offset in 1..=years {
            price = (price * growth_factor).round_dp(4);
            let cumulative = if base.value > Decimal::ZERO {
                ((price - base.value) / base.value * dec!(100)).round_dp(4)
            } else {
                Decimal::ZERO
            };
            records.push(ProjectionRecord {
                year: base.year + offset as i32,
                projected_price: price,
                variation_percent: growth_pct,
                cumulative_impact_percent: cumulative,
                is_projected: true,
            });
        }

        Ok(records)
    }
}

impl Default for TrendProjector {
    fn default() -> Self {
        Self::new(ProjectionSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compounds_the_base_price_forward() {
        let projector = TrendProjector::default();
        let history = vec![AnnualValue::new(2021, dec!(10))];

        let records = projector
            .project_with_rate(&history, dec!(5), 2)
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].projected_price, dec!(10));
        assert!(!records[0].is_projected);

        assert_eq!(records[1].year, 2022);
        assert_eq!(records[1].projected_price, dec!(10.5));
        assert_eq!(records[1].variation_percent, dec!(5));
        assert!(records[1].is_projected);

        assert_eq!(records[2].year, 2023);
        assert_eq!(records[2].projected_price, dec!(11.025));
        assert_eq!(records[2].cumulative_impact_percent, dec!(10.25));
    }

    #[test]
    fn medio_rate_is_the_historical_mean_variation() {
        let projector = TrendProjector::default();
        // 8 -> 8.4 is exactly +5%.
        let history = vec![AnnualValue::new(2020, dec!(8)), AnnualValue::new(2021, dec!(8.4))];

        assert_eq!(
            projector.growth_rate(&history, Scenario::Medio).unwrap(),
            dec!(5)
        );
        // Otimista sits the configured spread (2 pp) below, pessimista above.
        assert_eq!(
            projector.growth_rate(&history, Scenario::Otimista).unwrap(),
            dec!(3)
        );
        assert_eq!(
            projector.growth_rate(&history, Scenario::Pessimista).unwrap(),
            dec!(7)
        );
    }

    #[test]
    fn history_is_sorted_before_projecting() {
        let projector = TrendProjector::default();
        let history = vec![AnnualValue::new(2021, dec!(8.4)), AnnualValue::new(2020, dec!(8))];

        let records = projector.project(&history, Scenario::Medio, 1).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].variation_percent, dec!(5));
        assert_eq!(records[2].year, 2022);
        assert_eq!(records[2].projected_price, dec!(8.82));
    }

    #[test]
    fn too_short_history_is_surfaced() {
        let projector = TrendProjector::default();
        let one_row = vec![AnnualValue::new(2021, dec!(10))];
        assert!(matches!(
            projector.project(&one_row, Scenario::Medio, 2),
            Err(ProjectionError::NotEnoughData(_))
        ));
        assert!(projector.project_with_rate(&[], dec!(5), 2).is_err());
    }
}
