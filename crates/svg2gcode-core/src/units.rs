//! Machine unit mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Machine coordinate units (millimeters or inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimeters (metric), `G21`
    #[default]
    Mm,
    /// Inches (imperial), `G20`
    Inch,
}

impl Units {
    /// The G-code word selecting this unit mode.
    pub fn gcode_word(&self) -> &'static str {
        match self {
            Units::Mm => "G21",
            Units::Inch => "G20",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Mm => write!(f, "mm"),
            Units::Inch => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" => Ok(Units::Mm),
            "in" | "inch" | "imperial" => Ok(Units::Inch),
            other => Err(ConfigError::UnknownUnits(other.to_string())),
        }
    }
}
