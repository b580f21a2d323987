//! Fixed-point codec error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixedPointError {
    #[error("Invalid format: {specifier:?} {reason}")]
    InvalidFormat { specifier: String, reason: String },

    #[error("Invalid error strategy: {0:?} (expected \"raise\" or \"skip\")")]
    InvalidErrorStrategy(String),

    #[error("Invalid value type: {0} is not a real number")]
    InvalidValueType(f64),

    #[error("Value out of range: {value} not in [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl FixedPointError {
    pub(crate) fn invalid_format(specifier: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            specifier: specifier.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FixedPointError>;
