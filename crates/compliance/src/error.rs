use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComplianceError {
    #[error("Unknown outlier filter '{0}' (expected 'positivo', 'negativo' or 'ambos')")]
    InvalidFilter(String),
}
