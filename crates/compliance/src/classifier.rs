use configuration::ComplianceThresholds;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statistics::StatisticalSummary;
use std::fmt;

/// Severity class of a deviation from the official annual adjustment.
///
/// The serialized form and the `Display` labels are the Portuguese strings
/// the legacy dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLevel {
    #[serde(rename = "Muito Acima")]
    FarAbove,
    #[serde(rename = "Acima")]
    Above,
    #[serde(rename = "Alinhado")]
    Aligned,
    #[serde(rename = "Abaixo")]
    Below,
    #[serde(rename = "Muito Abaixo")]
    FarBelow,
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComplianceLevel::FarAbove => "Muito Acima",
            ComplianceLevel::Above => "Acima",
            ComplianceLevel::Aligned => "Alinhado",
            ComplianceLevel::Below => "Abaixo",
            ComplianceLevel::FarBelow => "Muito Abaixo",
        };
        write!(f, "{label}")
    }
}

/// The classified deviation of an observed variation from the official
/// adjustment. This is the record handed to the reporting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAssessment {
    pub variation_percent: Decimal,
    pub adjustment_percent: Decimal,
    pub deviation: Decimal,
    pub level: ComplianceLevel,
    /// Set when the assessment was produced for one bucket of a grouped
    /// aggregation.
    pub group_key: Option<String>,
}

/// A stateless classifier bucketing deviations into severity classes.
#[derive(Debug, Clone)]
pub struct ComplianceClassifier {
    thresholds: ComplianceThresholds,
}

impl ComplianceClassifier {
    /// Creates a classifier with the given deviation edges.
    pub fn new(thresholds: ComplianceThresholds) -> Self {
        Self { thresholds }
    }

    /// Classifies one observed variation against the official adjustment.
    ///
    /// The buckets are evaluated in order, first match wins. Boundary
    /// values land on the milder side: a deviation of exactly `far` is
    /// `Above`, exactly `near` is `Aligned` (and symmetrically below).
    pub fn classify(
        &self,
        variation_percent: Decimal,
        adjustment_percent: Decimal,
    ) -> ComplianceAssessment {
        let deviation = variation_percent - adjustment_percent;
        let far = self.thresholds.far_deviation_pct;
        let near = self.thresholds.near_deviation_pct;

        let level = if deviation > far {
            ComplianceLevel::FarAbove
        } else if deviation > near {
            ComplianceLevel::Above
        } else if deviation < -far {
            ComplianceLevel::FarBelow
        } else if deviation < -near {
            ComplianceLevel::Below
        } else {
            ComplianceLevel::Aligned
        };

        ComplianceAssessment {
            variation_percent,
            adjustment_percent,
            deviation,
            level,
            group_key: None,
        }
    }

    /// Classifies each bucket of a grouped aggregation by its mean
    /// variation. This is how the dashboard's per-category compliance view
    /// is produced: the aggregator groups the variations, this classifier
    /// judges each group.
    pub fn assess_groups(
        &self,
        groups: &[StatisticalSummary],
        adjustment_percent: Decimal,
    ) -> Vec<ComplianceAssessment> {
        groups
            .iter()
            .map(|group| {
                let mut assessment = self.classify(group.mean, adjustment_percent);
                assessment.group_key = group.group_key.clone();
                assessment
            })
            .collect()
    }
}

impl Default for ComplianceClassifier {
    fn default() -> Self {
        Self::new(ComplianceThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn classify(variation: Decimal, adjustment: Decimal) -> ComplianceLevel {
        ComplianceClassifier::default()
            .classify(variation, adjustment)
            .level
    }

    #[test]
    fn buckets_follow_the_dashboard_table() {
        assert_eq!(classify(dec!(12), dec!(8)), ComplianceLevel::FarAbove);
        assert_eq!(classify(dec!(9.5), dec!(8)), ComplianceLevel::Above);
        assert_eq!(classify(dec!(8.2), dec!(8)), ComplianceLevel::Aligned);
        assert_eq!(classify(dec!(7), dec!(8)), ComplianceLevel::Below);
        assert_eq!(classify(dec!(5), dec!(8)), ComplianceLevel::FarBelow);
    }

    #[test]
    fn upper_boundaries_land_on_the_milder_side() {
        // Exactly +2 is still "Acima"; the first strictly-greater value tips over.
        assert_eq!(classify(dec!(2.0), dec!(0)), ComplianceLevel::Above);
        assert_eq!(classify(dec!(2.01), dec!(0)), ComplianceLevel::FarAbove);
        // Exactly +0.5 is still "Alinhado".
        assert_eq!(classify(dec!(0.5), dec!(0)), ComplianceLevel::Aligned);
        assert_eq!(classify(dec!(0.51), dec!(0)), ComplianceLevel::Above);
    }

    #[test]
    fn lower_boundaries_land_on_the_milder_side() {
        assert_eq!(classify(dec!(-2.0), dec!(0)), ComplianceLevel::Below);
        assert_eq!(classify(dec!(-2.01), dec!(0)), ComplianceLevel::FarBelow);
        assert_eq!(classify(dec!(-0.5), dec!(0)), ComplianceLevel::Aligned);
        assert_eq!(classify(dec!(-0.51), dec!(0)), ComplianceLevel::Below);
    }

    #[test]
    fn labels_render_the_legacy_portuguese_strings() {
        assert_eq!(ComplianceLevel::FarAbove.to_string(), "Muito Acima");
        assert_eq!(ComplianceLevel::Aligned.to_string(), "Alinhado");
    }

    #[test]
    fn grouped_assessment_classifies_each_bucket_mean() {
        let classifier = ComplianceClassifier::default();
        let groups = vec![
            StatisticalSummary {
                mean: dec!(20),
                group_key: Some("antibioticos".to_string()),
                ..StatisticalSummary::zeroed()
            },
            StatisticalSummary {
                mean: dec!(8.1),
                group_key: Some("analgesicos".to_string()),
                ..StatisticalSummary::zeroed()
            },
        ];

        let assessments = classifier.assess_groups(&groups, dec!(8));
        assert_eq!(assessments[0].level, ComplianceLevel::FarAbove);
        assert_eq!(assessments[0].group_key.as_deref(), Some("antibioticos"));
        assert_eq!(assessments[1].level, ComplianceLevel::Aligned);
    }
}
