//! Error handling for svg2gcode
//!
//! Provides the error types shared across the pipeline:
//! - Path syntax errors (malformed path data, fatal for that single path)
//! - Configuration errors (fatal before any G-code is emitted)
//!
//! Degenerate geometry is never an error; the offsetter resolves it with a
//! fallback. All error types use `thiserror`.

use thiserror::Error;

/// Path mini-language syntax error
///
/// Raised by the path data interpreter. The caller decides whether to
/// abort the whole run or skip the entity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathSyntaxError {
    /// A coordinate appeared before any command letter
    #[error("path data must start with a command (M/m)")]
    MissingCommand,

    /// A numeric token could not be parsed
    #[error("invalid number {token:?}")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },

    /// A command ran out of coordinates
    #[error("command {command} needs {expected} coordinate(s), found {found}")]
    MissingCoordinates {
        /// The active command letter.
        command: char,
        /// Number of coordinates the command consumes.
        expected: usize,
        /// Number of coordinates available before the next command or end of input.
        found: usize,
    },

    /// A cubic curve group had fewer than six numbers
    #[error("incomplete {command} command; need 6 numbers, found {found}")]
    IncompleteCurve {
        /// `C` or `c`.
        command: char,
        /// Number of coordinates available before the next command or end of input.
        found: usize,
    },

    /// A coordinate followed a command that takes none (`Z`/`z`)
    #[error("unexpected coordinate {token:?} after {command}")]
    UnexpectedCoordinate {
        /// The active command letter.
        command: char,
        /// The offending token.
        token: String,
    },

    /// A `points` list did not pair up into x/y coordinates
    #[error("odd number of coordinates in points list ({found})")]
    OddCoordinateCount {
        /// Number of values in the list.
        found: usize,
    },
}

/// Configuration error
///
/// Reported before any motion instruction is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cut depth must be strictly negative
    #[error("cut depth must be negative, got {0:.3}")]
    NonNegativeCutDepth(f64),

    /// Compensation selected without a usable tool
    #[error("tool diameter must be > 0 when compensation is {mode}, got {diameter:.3}")]
    ToolDiameterRequired {
        /// The selected compensation mode.
        mode: String,
        /// The configured tool diameter.
        diameter: f64,
    },

    /// Scale factor must be finite and positive
    #[error("scale must be a positive number, got {0}")]
    InvalidScale(f64),

    /// Feed rates must be positive
    #[error("{name} must be > 0, got {value:.3}")]
    InvalidFeedRate {
        /// Which feed rate.
        name: &'static str,
        /// The configured value.
        value: f64,
    },

    /// Safe height must clear the cut depth
    #[error("safe height {safe_z:.3} must be above cut depth {cut_depth:.3}")]
    SafeHeightBelowCut {
        /// Configured safe height.
        safe_z: f64,
        /// Configured cut depth.
        cut_depth: f64,
    },

    /// Step-down so small that the depth range needs too many passes
    #[error("step down {step_down} needs {passes} passes, more than the limit of {max}")]
    TooManyPasses {
        /// Configured step-down.
        step_down: f64,
        /// Passes the depth range would take.
        passes: f64,
        /// Largest accepted pass count.
        max: usize,
    },

    /// Unknown compensation mode string
    #[error("invalid compensation {0:?} (must be none, inside, outside)")]
    UnknownCompensation(String),

    /// Unknown unit string
    #[error("invalid units {0:?} (must be mm or inch)")]
    UnknownUnits(String),
}
