use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength label for a correlation coefficient, judged on `|r|`: a strong
/// negative correlation is still a strong correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationStrength {
    Alta,
    #[serde(rename = "Média")]
    Media,
    Baixa,
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationStrength::Alta => write!(f, "Alta"),
            CorrelationStrength::Media => write!(f, "Média"),
            CorrelationStrength::Baixa => write!(f, "Baixa"),
        }
    }
}

/// One year present in both input series, with both values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub year: i32,
    pub x: Decimal,
    pub y: Decimal,
}

/// The outcome of a correlation analysis.
///
/// `coefficient` is `None` when the correlation is undefined: fewer than
/// two aligned years, or no variance on one side. The aligned pairs are
/// always present so the presentation layer can render the per-year
/// breakdown either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub coefficient: Option<f64>, // Option<> because < 2 aligned points has no correlation
    pub strength: Option<CorrelationStrength>,
    pub pairs: Vec<AlignedPair>,
}

impl CorrelationReport {
    /// Whether the analysis produced a defined coefficient.
    pub fn is_defined(&self) -> bool {
        self.coefficient.is_some()
    }
}
