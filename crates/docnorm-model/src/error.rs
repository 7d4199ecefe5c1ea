use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid country code '{0}': expected 2-4 uppercase ASCII letters")]
    InvalidCountryCode(String),
    #[error("'Unknown' is reserved and cannot be used as a country code")]
    ReservedCountryCode,
}

pub type Result<T> = std::result::Result<T, ModelError>;
