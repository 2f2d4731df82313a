use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaxError {
    #[error("Invalid tax-exclusive price: {0} (must be strictly positive)")]
    InvalidPrice(Decimal),

    #[error("Invalid tax rate: {0}% (must satisfy 0 <= rate < 100)")]
    InvalidRate(Decimal),

    #[error("Unknown state code '{0}'")]
    UnknownState(String),
}
