use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Configuration(#[from] configuration::ConfigError),

    #[error(transparent)]
    Statistics(#[from] statistics::StatisticsError),

    #[error(transparent)]
    Compliance(#[from] compliance::ComplianceError),

    #[error(transparent)]
    Elasticity(#[from] elasticity::ElasticityError),

    #[error(transparent)]
    Projection(#[from] projection::ProjectionError),

    #[error(transparent)]
    Tax(#[from] taxes::TaxError),
}
