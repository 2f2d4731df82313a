use crate::report::{AlignedPair, CorrelationReport, CorrelationStrength};
use configuration::CorrelationCutoffs;
use core_types::AnnualValue;
use rust_decimal::prelude::*;
use std::collections::HashMap;

/// A stateless analyzer computing the Pearson correlation between two
/// annual series.
#[derive(Debug, Clone)]
pub struct CorrelationAnalyzer {
    cutoffs: CorrelationCutoffs,
}

impl CorrelationAnalyzer {
    pub fn new(cutoffs: CorrelationCutoffs) -> Self {
        Self { cutoffs }
    }

    /// Correlates two annual series.
    ///
    /// The series are aligned on the intersection of their years; a year
    /// present in only one series is dropped, never treated as zero. The
    /// result is order-independent with respect to the input ordering.
    pub fn correlate(
        &self,
        series_a: &[AnnualValue],
        series_b: &[AnnualValue],
    ) -> CorrelationReport {
        let by_year_b: HashMap<i32, Decimal> =
            series_b.iter().map(|v| (v.year, v.value)).collect();

        let mut pairs: Vec<AlignedPair> = series_a
            .iter()
            .filter_map(|a| {
                by_year_b.get(&a.year).map(|b| AlignedPair {
                    year: a.year,
                    x: a.value,
                    y: *b,
                })
            })
            .collect();
        pairs.sort_by_key(|p| p.year);
        pairs.dedup_by_key(|p| p.year);

        let dropped = series_a.len() + series_b.len() - 2 * pairs.len();
        if dropped > 0 {
            tracing::debug!("Correlation alignment dropped {dropped} unmatched rows");
        }

        let coefficient = pearson(&pairs);
        let strength = coefficient.map(|r| self.classify(r));

        CorrelationReport {
            coefficient,
            strength,
            pairs,
        }
    }

    /// Classifies a coefficient on its absolute value.
    pub fn classify(&self, coefficient: f64) -> CorrelationStrength {
        let magnitude = coefficient.abs();
        if magnitude > self.cutoffs.strong {
            CorrelationStrength::Alta
        } else if magnitude > self.cutoffs.moderate {
            CorrelationStrength::Media
        } else {
            CorrelationStrength::Baixa
        }
    }
}

impl Default for CorrelationAnalyzer {
    fn default() -> Self {
        Self::new(CorrelationCutoffs::default())
    }
}

/// Pearson correlation over the aligned pairs, or `None` when it is
/// undefined (fewer than two pairs, or zero variance on either side).
fn pearson(pairs: &[AlignedPair]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    // The coefficient needs a square root, so this one calculation runs in
    // f64. A controlled and accepted precision trade-off: the coefficient
    // is a dimensionless statistic, not a price.
    let x: Vec<f64> = pairs.iter().map(|p| p.x.to_f64().unwrap_or(f64::NAN)).collect();
    let y: Vec<f64> = pairs.iter().map(|p| p.y.to_f64().unwrap_or(f64::NAN)).collect();

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let numerator: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();
    let denominator_x: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
    let denominator_y: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let denominator = (denominator_x * denominator_y).sqrt();

    if denominator == 0.0 || !denominator.is_finite() {
        None
    } else {
        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rust_decimal_macros::dec;

    fn series(points: &[(i32, Decimal)]) -> Vec<AnnualValue> {
        points.iter().map(|(y, v)| AnnualValue::new(*y, *v)).collect()
    }

    #[test]
    fn perfectly_aligned_series_correlate_to_one() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2019, dec!(1)), (2020, dec!(2)), (2021, dec!(3))]);
        let b = series(&[(2019, dec!(10)), (2020, dec!(20)), (2021, dec!(30))]);

        let report = analyzer.correlate(&a, &b);
        assert_approx_eq!(report.coefficient.unwrap(), 1.0, 1e-12);
        assert_eq!(report.strength, Some(CorrelationStrength::Alta));
        assert_eq!(report.pairs.len(), 3);
    }

    #[test]
    fn inverse_series_are_still_strongly_correlated() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2019, dec!(1)), (2020, dec!(2)), (2021, dec!(3))]);
        let b = series(&[(2019, dec!(30)), (2020, dec!(20)), (2021, dec!(10))]);

        let report = analyzer.correlate(&a, &b);
        assert_approx_eq!(report.coefficient.unwrap(), -1.0, 1e-12);
        assert_eq!(report.strength, Some(CorrelationStrength::Alta));
    }

    #[test]
    fn years_present_in_only_one_series_are_dropped() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2018, dec!(99)), (2019, dec!(1)), (2020, dec!(2)), (2021, dec!(3))]);
        let b = series(&[(2019, dec!(10)), (2020, dec!(20)), (2021, dec!(30)), (2022, dec!(99))]);

        let report = analyzer.correlate(&a, &b);
        assert_eq!(report.pairs.len(), 3);
        assert_eq!(report.pairs[0].year, 2019);
        assert_approx_eq!(report.coefficient.unwrap(), 1.0, 1e-12);
    }

    #[test]
    fn result_does_not_depend_on_input_ordering() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2021, dec!(3)), (2019, dec!(1)), (2020, dec!(2))]);
        let b = series(&[(2020, dec!(17)), (2021, dec!(35)), (2019, dec!(11))]);

        let shuffled = analyzer.correlate(&a, &b);

        let a_sorted = series(&[(2019, dec!(1)), (2020, dec!(2)), (2021, dec!(3))]);
        let b_sorted = series(&[(2019, dec!(11)), (2020, dec!(17)), (2021, dec!(35))]);
        let sorted = analyzer.correlate(&a_sorted, &b_sorted);

        assert_eq!(shuffled, sorted);
    }

    #[test]
    fn fewer_than_two_aligned_points_is_undefined() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2019, dec!(1)), (2020, dec!(2))]);
        let b = series(&[(2020, dec!(10)), (2021, dec!(20))]);

        let report = analyzer.correlate(&a, &b);
        assert_eq!(report.coefficient, None);
        assert_eq!(report.strength, None);
        assert_eq!(report.pairs.len(), 1);
    }

    #[test]
    fn a_constant_side_is_undefined_not_an_error() {
        let analyzer = CorrelationAnalyzer::default();
        let a = series(&[(2019, dec!(5)), (2020, dec!(5)), (2021, dec!(5))]);
        let b = series(&[(2019, dec!(10)), (2020, dec!(20)), (2021, dec!(30))]);

        assert_eq!(analyzer.correlate(&a, &b).coefficient, None);
    }

    #[test]
    fn strength_cutoffs_judge_the_absolute_value() {
        let analyzer = CorrelationAnalyzer::default();
        assert_eq!(analyzer.classify(0.71), CorrelationStrength::Alta);
        assert_eq!(analyzer.classify(0.7), CorrelationStrength::Media);
        assert_eq!(analyzer.classify(-0.9), CorrelationStrength::Alta);
        assert_eq!(analyzer.classify(0.31), CorrelationStrength::Media);
        assert_eq!(analyzer.classify(0.3), CorrelationStrength::Baixa);
        assert_eq!(analyzer.classify(0.0), CorrelationStrength::Baixa);
    }
}
