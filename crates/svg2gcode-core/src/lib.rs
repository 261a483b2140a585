//! # svg2gcode Core
//!
//! Core types shared by every stage of the SVG to G-code pipeline:
//! - [`Point`] values in a single coordinate space
//! - [`Transform`], the 2x3 affine matrix used to carry group context
//! - [`Units`] for the machine unit mode
//! - The error taxonomy (path syntax, configuration)

pub mod error;
pub mod point;
pub mod transform;
pub mod units;

pub use error::{ConfigError, PathSyntaxError};
pub use point::{Point, POINT_EPSILON};
pub use transform::Transform;
pub use units::Units;
