use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Where a price observation came from.
///
/// Supplier quotes are negotiated purchase prices; regulatory quotes are the
/// published CMED ceiling prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Supplier,
    Regulatory,
}

impl FromStr for QuoteSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supplier" => Ok(QuoteSource::Supplier),
            "regulatory" => Ok(QuoteSource::Regulatory),
            other => Err(CoreError::InvalidInput(
                "source".to_string(),
                format!("unknown quote source '{other}'"),
            )),
        }
    }
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSource::Supplier => write!(f, "supplier"),
            QuoteSource::Regulatory => write!(f, "regulatory"),
        }
    }
}
