use crate::error::ProjectionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named growth scenario.
///
/// `Medio` compounds the historical mean variation; `Otimista` assumes
/// smaller increases (this is a purchaser's dashboard, so cheaper is the
/// optimistic case) and `Pessimista` larger ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Otimista,
    Medio,
    Pessimista,
}

impl FromStr for Scenario {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "otimista" => Ok(Scenario::Otimista),
            "medio" | "médio" => Ok(Scenario::Medio),
            "pessimista" => Ok(Scenario::Pessimista),
            other => Err(ProjectionError::UnknownScenario(other.to_string())),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Otimista => write!(f, "otimista"),
            Scenario::Medio => write!(f, "medio"),
            Scenario::Pessimista => write!(f, "pessimista"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_legacy_names() {
        assert_eq!("otimista".parse::<Scenario>().unwrap(), Scenario::Otimista);
        assert_eq!("Medio".parse::<Scenario>().unwrap(), Scenario::Medio);
        assert_eq!("médio".parse::<Scenario>().unwrap(), Scenario::Medio);
        assert_eq!(
            " pessimista ".parse::<Scenario>().unwrap(),
            Scenario::Pessimista
        );
    }

    #[test]
    fn unknown_names_are_surfaced() {
        assert!(matches!(
            "agressivo".parse::<Scenario>(),
            Err(ProjectionError::UnknownScenario(_))
        ));
    }
}
