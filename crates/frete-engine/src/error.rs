use thiserror::Error;

use crate::utils::unit::UnitError;

pub type Result<T> = std::result::Result<T, PricingError>;

/// Fatal pricing failures. Absent optional inputs (corridor, regional
/// override, special surcharges) are never errors.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("No tariff table for category {category} in version {version}")]
    TariffNotFound { category: String, version: String },

    #[error("No pricing parameters for tariff version {0}")]
    ParametersNotFound(String),

    #[error("Invalid cargo spec: {0}")]
    InvalidCargoSpec(String),

    #[error("Unknown destination: {0}")]
    DestinationNotFound(String),
}

impl From<UnitError> for PricingError {
    fn from(err: UnitError) -> Self {
        PricingError::InvalidCargoSpec(err.to_string())
    }
}
