//! Error types for the CAM tools crate.
//!
//! Configuration problems surface as [`CamToolError::Config`] before any
//! instruction is produced.

use svg2gcode_core::ConfigError;
use thiserror::Error;

/// Errors that can occur during toolpath generation.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Cutting parameters failed validation.
    #[error("Invalid parameters: {0}")]
    Config(#[from] ConfigError),
}

impl CamToolError {
    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, CamToolError::Config(_))
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
