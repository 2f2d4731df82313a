use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatisticsError {
    #[error("Malformed grouping key: {0}")]
    InvalidGroupKey(String),
}
