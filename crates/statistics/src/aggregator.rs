use crate::error::StatisticsError;
use crate::summary::StatisticalSummary;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A stateless calculator for descriptive statistics over price collections.
#[derive(Debug, Default, Clone)]
pub struct StatisticsAggregator {}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes a collection of prices into mean/median/min/max/count.
    ///
    /// Non-positive values are excluded before computing: zero and negative
    /// prices are dirty data, and a single dirty record must not abort a
    /// whole report. If nothing survives the filter, the zero summary is
    /// returned.
    pub fn summarize(&self, values: &[Decimal]) -> StatisticalSummary {
        let prices: Vec<Decimal> = values
            .iter()
            .copied()
            .filter(|p| *p > Decimal::ZERO)
            .collect();
        summarize_values(prices)
    }

    /// Summarizes a collection of signed values, such as percentage
    /// variations, where negatives and zeros are legitimate observations
    /// and must not be filtered out.
    pub fn summarize_signed(&self, values: &[Decimal]) -> StatisticalSummary {
        summarize_values(values.to_vec())
    }

    /// Boundary variant of [`summarize`](Self::summarize) for raw rows where
    /// the value may be absent entirely. `None` entries are dropped first.
    pub fn summarize_raw(&self, values: &[Option<Decimal>]) -> StatisticalSummary {
        let present: Vec<Decimal> = values.iter().filter_map(|v| *v).collect();
        let dropped = values.len() - present.len();
        if dropped > 0 {
            tracing::debug!("summarize_raw: dropped {dropped} null entries");
        }
        self.summarize(&present)
    }

    /// Groups records by `key_fn`, summarizes each bucket's `value_fn`
    /// values with price semantics (non-positives excluded), and orders the
    /// buckets by `count` descending (the order the dashboard's "top N"
    /// listings use). Ties are broken by key so the output is
    /// deterministic.
    ///
    /// An empty grouping key indicates a caller bug, not dirty data, and is
    /// surfaced as an error rather than silently bucketed.
    pub fn summarize_grouped<T, K, V>(
        &self,
        records: &[T],
        key_fn: K,
        value_fn: V,
    ) -> Result<Vec<StatisticalSummary>, StatisticsError>
    where
        K: Fn(&T) -> String,
        V: Fn(&T) -> Decimal,
    {
        self.grouped_with(records, key_fn, value_fn, |agg, values| agg.summarize(values))
    }

    /// Grouped variant for signed values (percentage variations): buckets
    /// keep their negative and zero entries.
    pub fn summarize_grouped_signed<T, K, V>(
        &self,
        records: &[T],
        key_fn: K,
        value_fn: V,
    ) -> Result<Vec<StatisticalSummary>, StatisticsError>
    where
        K: Fn(&T) -> String,
        V: Fn(&T) -> Decimal,
    {
        self.grouped_with(records, key_fn, value_fn, |agg, values| {
            agg.summarize_signed(values)
        })
    }

    fn grouped_with<T, K, V, S>(
        &self,
        records: &[T],
        key_fn: K,
        value_fn: V,
        summarize_fn: S,
    ) -> Result<Vec<StatisticalSummary>, StatisticsError>
    where
        K: Fn(&T) -> String,
        V: Fn(&T) -> Decimal,
        S: Fn(&Self, &[Decimal]) -> StatisticalSummary,
    {
        let mut buckets: HashMap<String, Vec<Decimal>> = HashMap::new();
        for record in records {
            let key = key_fn(record);
            if key.trim().is_empty() {
                return Err(StatisticsError::InvalidGroupKey(
                    "grouping key must not be empty".to_string(),
                ));
            }
            buckets.entry(key).or_default().push(value_fn(record));
        }

        let mut groups: Vec<StatisticalSummary> = buckets
            .into_iter()
            .map(|(key, values)| {
                let mut summary = summarize_fn(self, &values);
                summary.group_key = Some(key);
                summary
            })
            .collect();

        groups.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.group_key.cmp(&b.group_key))
        });

        Ok(groups)
    }

    /// Truncates a grouped result to its `n` largest buckets.
    pub fn top(&self, mut groups: Vec<StatisticalSummary>, n: usize) -> Vec<StatisticalSummary> {
        groups.truncate(n);
        groups
    }
}

/// Converts float-shaped input into decimals, dropping NaN and infinities.
///
/// This is the ingestion path for values that arrive from the RPC layer as
/// raw floats instead of decimal strings.
pub fn decimals_from_f64(values: &[f64]) -> Vec<Decimal> {
    values
        .iter()
        .filter_map(|v| Decimal::from_f64(*v))
        .collect()
}

/// Summarizes an already-filtered collection of values.
fn summarize_values(mut values: Vec<Decimal>) -> StatisticalSummary {
    if values.is_empty() {
        return StatisticalSummary::zeroed();
    }

    values.sort();

    let count = values.len();
    let sum: Decimal = values.iter().sum();
    let mean = sum / Decimal::from(count);

    StatisticalSummary {
        mean,
        median: median_of_sorted(&values),
        min: values[0],
        max: values[count - 1],
        count,
        group_key: None,
    }
}

/// Median of an already-sorted, non-empty sequence: the average of the two
/// middle elements for an even count, the single middle element otherwise.
fn median_of_sorted(sorted: &[Decimal]) -> Decimal {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / Decimal::from(2)
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_input_yields_the_zero_summary() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize(&[]);
        assert_eq!(summary, StatisticalSummary::zeroed());
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn all_filtered_input_yields_the_zero_summary_not_an_error() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize(&[dec!(0), dec!(-5), dec!(-0.01)]);
        assert_eq!(summary, StatisticalSummary::zeroed());
    }

    #[test]
    fn even_count_median_averages_the_middle_pair() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize(&[dec!(10), dec!(20), dec!(30), dec!(40)]);
        assert_eq!(summary.median, dec!(25));
        assert_eq!(summary.mean, dec!(25));
        assert_eq!(summary.min, dec!(10));
        assert_eq!(summary.max, dec!(40));
        assert_eq!(summary.count, 4);
    }

    #[test]
    fn odd_count_median_takes_the_middle_element() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize(&[dec!(30), dec!(10), dec!(20)]);
        assert_eq!(summary.median, dec!(20));
    }

    #[test]
    fn non_positive_values_are_excluded_from_the_aggregate() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize(&[dec!(10), dec!(0), dec!(-4), dec!(20)]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, dec!(15));
    }

    #[test]
    fn signed_summaries_keep_negative_variations() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize_signed(&[dec!(-6), dec!(2), dec!(4)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, dec!(0));
        assert_eq!(summary.median, dec!(2));
        assert_eq!(summary.min, dec!(-6));
    }

    #[test]
    fn summarize_raw_drops_null_entries_first() {
        let aggregator = StatisticsAggregator::new();
        let summary = aggregator.summarize_raw(&[Some(dec!(10)), None, Some(dec!(20)), None]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, dec!(15));
    }

    #[test]
    fn float_ingestion_drops_nan_and_infinities() {
        let values = decimals_from_f64(&[10.0, f64::NAN, f64::INFINITY, 20.0]);
        assert_eq!(values, vec![dec!(10), dec!(20)]);
    }

    #[test]
    fn grouped_summaries_are_ordered_by_count_descending() {
        let aggregator = StatisticsAggregator::new();
        let records = vec![
            ("antibioticos", dec!(10)),
            ("analgesicos", dec!(8)),
            ("antibioticos", dec!(30)),
            ("antibioticos", dec!(20)),
            ("analgesicos", dec!(12)),
            ("oncologicos", dec!(100)),
        ];

        let groups = aggregator
            .summarize_grouped(&records, |r| r.0.to_string(), |r| r.1)
            .unwrap();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].group_key.as_deref(), Some("antibioticos"));
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].median, dec!(20));
        assert_eq!(groups[1].group_key.as_deref(), Some("analgesicos"));
        assert_eq!(groups[1].mean, dec!(10));

        let top = aggregator.top(groups, 2);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn empty_group_key_is_surfaced_as_a_caller_bug() {
        let aggregator = StatisticsAggregator::new();
        let records = vec![("", dec!(10))];
        let err = aggregator
            .summarize_grouped(&records, |r| r.0.to_string(), |r| r.1)
            .unwrap_err();
        assert!(matches!(err, StatisticsError::InvalidGroupKey(_)));
    }
}
