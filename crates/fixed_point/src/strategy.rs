//! Out-of-range handling for encoding

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FixedPointError;

/// What to do with a value outside the layout's range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStrategy {
    /// Fail with [`FixedPointError::OutOfRange`]
    #[default]
    Raise,
    /// Saturate to the nearest extreme pattern
    Skip,
}

impl ErrorStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorStrategy::Raise => "raise",
            ErrorStrategy::Skip => "skip",
        }
    }
}

impl FromStr for ErrorStrategy {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(ErrorStrategy::Raise),
            "skip" => Ok(ErrorStrategy::Skip),
            other => Err(FixedPointError::InvalidErrorStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ErrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
