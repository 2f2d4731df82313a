use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Unknown scenario '{0}' (expected 'otimista', 'medio' or 'pessimista')")]
    UnknownScenario(String),

    #[error("Not enough data to project: {0}")]
    NotEnoughData(String),
}
