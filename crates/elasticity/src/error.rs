use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElasticityError {
    #[error("Invalid price band: {0}")]
    InvalidBand(String),

    #[error(transparent)]
    Statistics(#[from] statistics::StatisticsError),
}
