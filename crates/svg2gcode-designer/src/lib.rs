//! # svg2gcode Designer
//!
//! Turns SVG vector data into polylines ready for toolpath generation.
//!
//! ## Components
//!
//! - **Curve flattening** ([`bezier`]): adaptive De Casteljau subdivision of
//!   cubic segments within a flatness tolerance
//! - **Path data** ([`path_data`]): tokenizer and interpreter for the
//!   `M L H V C Z` command set, points lists and canonical re-serialization
//! - **Import** ([`import`]): document walker resolving group transforms and
//!   stroke colors, with construction geometry filtering
//!
//! ## Pipeline
//!
//! ```text
//! SVG text
//!   └── SvgImporter (group stack: transform + color)
//!         ├── <path d>        → PathInterpreter → CubicBezier flattening
//!         ├── <polyline>      → points list (open)
//!         └── <polygon>       → points list (closed)
//!               └── GeometryEntity { points, closed, color }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use svg2gcode_designer::SvgImporter;
//!
//! let svg = r#"<svg viewBox="0 0 10 10"><path d="M0,0 L10,0 L10,10 Z"/></svg>"#;
//! let doc = SvgImporter::new().import_string(svg).unwrap();
//! assert_eq!(doc.entities.len(), 1);
//! assert!(doc.entities[0].closed);
//! ```

pub mod bezier;
pub mod import;
pub mod model;
pub mod path_data;
pub mod style;

pub use bezier::{CubicBezier, DEFAULT_FLATNESS, MAX_SUBDIVISION_DEPTH};
pub use import::{
    parse_construction_color, ElementKind, ImportError, ImportedDocument, SvgImporter,
    DEFAULT_CONSTRUCTION_COLOR,
};
pub use model::GeometryEntity;
pub use path_data::{
    find_unsupported_command, format_path_data, has_unsupported_commands, parse_path_data,
    parse_points_list, ParsedPath, PathInterpreter,
};
pub use style::{extract_stroke_color, normalize_color, parse_transform_attr};
