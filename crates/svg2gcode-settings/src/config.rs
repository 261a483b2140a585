//! Configuration file handling for svg2gcode
//!
//! Configuration is organized into sections:
//! - Cutting parameters (heights, depths, feeds, compensation)
//! - Import settings (construction color, curve flatness)
//! - Output settings (decimal places, header comments)
//!
//! Files are TOML or JSON, selected by extension. Missing keys fall back to
//! their defaults so partial files are accepted.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svg2gcode_camtools::{CutParameters, DEFAULT_PRECISION};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Largest accepted number of decimal places.
pub const MAX_DECIMALS: usize = 10;

/// On-disk configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Detects the format from a path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// SVG import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Stroke color of geometry to ignore; `none` or empty disables filtering
    pub construction_color: String,
    /// Curve flatness tolerance in document units
    pub flatness: f64,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            construction_color: "#0000ff".to_string(),
            flatness: 0.1,
        }
    }
}

/// G-code output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Decimal places for coordinates and feeds
    pub decimals: usize,
    /// Whether to add parameter summary comments
    pub header: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_PRECISION,
            header: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Cutting parameters
    pub cutting: CutParameters,
    /// Import settings
    pub import: ImportSettings,
    /// Output settings
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, `<config_dir>/svg2gcode/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("svg2gcode").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the default config file if it exists, otherwise return defaults
    pub fn load_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.cutting.validate()?;

        if self.import.flatness <= 0.0 || self.import.flatness.is_nan() {
            return Err(SettingsError::InvalidSetting {
                key: "import.flatness".to_string(),
                reason: format!("must be > 0, got {}", self.import.flatness),
            });
        }

        if self.output.decimals > MAX_DECIMALS {
            return Err(SettingsError::InvalidSetting {
                key: "output.decimals".to_string(),
                reason: format!("must be at most {}", MAX_DECIMALS),
            });
        }

        Ok(())
    }
}
