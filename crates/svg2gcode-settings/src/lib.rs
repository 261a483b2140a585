//! svg2gcode Settings Crate
//!
//! Loads and saves cutting defaults and output preferences as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, ImportSettings, OutputSettings};
pub use error::{SettingsError, SettingsResult};
