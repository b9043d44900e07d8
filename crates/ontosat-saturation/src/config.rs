//! Saturation settings

use crate::SaturationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Saturation modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaturationMode {
    /// Adds a class assertion `∃r.C(x)` for each derivation.
    #[default]
    Assertional,

    /// Adds a named class `rC` equivalent to `∃r.C` for each derivation.
    Terminological,
}

impl fmt::Display for SaturationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationMode::Assertional => write!(f, "assertional"),
            SaturationMode::Terminological => write!(f, "terminological"),
        }
    }
}

impl FromStr for SaturationMode {
    type Err = SaturationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "assertional" => Ok(SaturationMode::Assertional),
            "terminological" => Ok(SaturationMode::Terminological),
            _ => Err(SaturationError::InvalidMode(s.to_string())),
        }
    }
}

/// Options for a [`Saturator`](crate::Saturator)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationOptions {
    pub mode: SaturationMode,
}

impl SaturationOptions {
    pub fn with_mode(mode: SaturationMode) -> Self {
        Self { mode }
    }
}
