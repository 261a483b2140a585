//! # svg2gcode CAM Tools
//!
//! Turns geometry entities into G-code.
//!
//! ## Components
//!
//! - **Parameters**: [`CutParameters`] with validation, pass depth planning
//!   and the source-to-machine coordinate mapping
//! - **Offset**: polygon offsetting for inside/outside cutter compensation
//! - **Toolpath**: [`ToolpathGenerator`] emitting multi-pass cuts as
//!   [`GcodeCommand`] values
//! - **G-code**: [`GcodeWriter`] serializing instructions with fixed precision

pub mod error;
pub mod gcode;
pub mod offset;
pub mod parameters;
pub mod toolpath;

pub use error::{CamToolError, CamToolResult};
pub use gcode::{GcodeCommand, GcodeWriter, DEFAULT_PRECISION};
pub use offset::{offset_polygon, signed_area, OffsetSide};
pub use parameters::{Compensation, CutParameters, MAX_PASSES};
pub use toolpath::ToolpathGenerator;
