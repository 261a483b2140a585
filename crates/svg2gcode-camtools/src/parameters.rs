//! Cutting parameters and their validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use svg2gcode_core::{ConfigError, Point, Units};

use crate::offset::OffsetSide;

/// Slack applied before rounding the pass count up, so a depth range that is
/// an exact multiple of the step does not gain an extra pass from rounding noise.
const PASS_EPSILON: f64 = 1e-9;

/// Largest number of depth passes accepted per entity.
pub const MAX_PASSES: usize = 10_000;

/// Cutter compensation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compensation {
    /// Cut on the drawn line
    #[default]
    None,
    /// Keep the tool inside closed shapes
    Inside,
    /// Keep the tool outside closed shapes
    Outside,
}

impl Compensation {
    /// The offset side, or `None` when compensation is off.
    pub fn side(&self) -> Option<OffsetSide> {
        match self {
            Compensation::None => None,
            Compensation::Inside => Some(OffsetSide::Inside),
            Compensation::Outside => Some(OffsetSide::Outside),
        }
    }
}

impl fmt::Display for Compensation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compensation::None => write!(f, "none"),
            Compensation::Inside => write!(f, "inside"),
            Compensation::Outside => write!(f, "outside"),
        }
    }
}

impl FromStr for Compensation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Compensation::None),
            "inside" => Ok(Compensation::Inside),
            "outside" => Ok(Compensation::Outside),
            other => Err(ConfigError::UnknownCompensation(other.to_string())),
        }
    }
}

/// Parameters for toolpath generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutParameters {
    /// Height for safe travel between cuts
    pub safe_z: f64,
    /// Final cut depth, must be negative
    pub cut_depth: f64,
    /// Depth per pass (positive). Zero or negative cuts in a single pass
    pub step_down: f64,
    /// XY cutting feed rate (units/min)
    pub feed_rate: f64,
    /// Z plunge feed rate (units/min)
    pub plunge_rate: f64,
    /// Source units to machine units factor
    pub scale: f64,
    /// Tool diameter in machine units
    pub tool_diameter: f64,
    /// Cutter compensation for closed shapes
    pub compensation: Compensation,
    /// Machine unit mode
    pub units: Units,
    /// Document height in source units, used for the Y flip
    pub document_height: f64,
}

impl Default for CutParameters {
    fn default() -> Self {
        Self {
            safe_z: 5.0,
            cut_depth: -1.0,
            step_down: 0.0,
            feed_rate: 300.0,
            plunge_rate: 120.0,
            scale: 1.0,
            tool_diameter: 0.0,
            compensation: Compensation::None,
            units: Units::Mm,
            document_height: 0.0,
        }
    }
}

impl CutParameters {
    /// Checks the parameters. Must pass before any instruction is produced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cut_depth >= 0.0 || self.cut_depth.is_nan() {
            return Err(ConfigError::NonNegativeCutDepth(self.cut_depth));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        for (name, value) in [("feed rate", self.feed_rate), ("plunge rate", self.plunge_rate)] {
            if value <= 0.0 || value.is_nan() {
                return Err(ConfigError::InvalidFeedRate { name, value });
            }
        }
        if self.safe_z <= self.cut_depth || self.safe_z.is_nan() {
            return Err(ConfigError::SafeHeightBelowCut {
                safe_z: self.safe_z,
                cut_depth: self.cut_depth,
            });
        }
        let passes = self.raw_pass_count();
        if passes > MAX_PASSES as f64 {
            return Err(ConfigError::TooManyPasses {
                step_down: self.step_down,
                passes,
                max: MAX_PASSES,
            });
        }
        if self.compensation != Compensation::None
            && (self.tool_diameter <= 0.0 || self.tool_diameter.is_nan())
        {
            return Err(ConfigError::ToolDiameterRequired {
                mode: self.compensation.to_string(),
                diameter: self.tool_diameter,
            });
        }
        Ok(())
    }

    /// Effective depth per pass.
    pub fn effective_step(&self) -> f64 {
        if self.step_down > 0.0 {
            self.step_down
        } else {
            (self.cut_depth - self.safe_z).abs()
        }
    }

    fn raw_pass_count(&self) -> f64 {
        let range = (self.cut_depth - self.safe_z).abs();
        let step = self.effective_step();
        if step <= 0.0 || step.is_nan() {
            return 1.0;
        }
        (range / step - PASS_EPSILON).ceil().max(1.0)
    }

    /// Number of passes from safe height down to the cut depth.
    ///
    /// Capped at [`MAX_PASSES`]; [`validate`](Self::validate) rejects
    /// parameters that would need more.
    pub fn pass_count(&self) -> usize {
        (self.raw_pass_count() as usize).min(MAX_PASSES)
    }

    /// Z level of every pass. The last is exactly `cut_depth`.
    pub fn pass_depths(&self) -> Vec<f64> {
        let passes = self.pass_count();
        let step = self.effective_step();
        (1..=passes)
            .map(|k| {
                if k == passes {
                    self.cut_depth
                } else {
                    (self.safe_z - k as f64 * step).max(self.cut_depth)
                }
            })
            .collect()
    }

    /// Tool radius expressed in source units.
    pub fn compensation_delta(&self) -> f64 {
        self.tool_diameter / 2.0 / self.scale
    }

    /// Maps a source point to machine space (Y flip, then scale).
    pub fn to_machine(&self, p: Point) -> Point {
        Point::new(p.x * self.scale, (self.document_height - p.y) * self.scale)
    }
}
