//! # svg2gcode
//!
//! Converts flat 2D vector geometry from SVG documents into G-code for
//! subtractive CNC machines (routers, mills, laser cutters).
//!
//! ## Architecture
//!
//! svg2gcode is organized as a workspace with multiple crates:
//!
//! 1. **svg2gcode-core** - Points, affine transforms, units, shared errors
//! 2. **svg2gcode-designer** - Bézier flattening, path data interpreter, SVG import
//! 3. **svg2gcode-camtools** - Cutting parameters, polygon offsetting, toolpath emission
//! 4. **svg2gcode-settings** - TOML/JSON configuration files
//! 5. **svg2gcode** - End-to-end pipeline and the command-line binary

pub use svg2gcode_camtools::{
    offset_polygon, CamToolError, Compensation, CutParameters, GcodeCommand, GcodeWriter,
    OffsetSide, ToolpathGenerator,
};
pub use svg2gcode_core::{ConfigError, PathSyntaxError, Point, Transform, Units};
pub use svg2gcode_designer::{
    parse_path_data, GeometryEntity, ImportError, ImportedDocument, SvgImporter,
};
pub use svg2gcode_settings::{Config, SettingsError};

use thiserror::Error;
use tracing::{info, warn};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Errors from the end-to-end conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The SVG document could not be imported.
    #[error("SVG import failed: {0}")]
    Import(#[from] ImportError),

    /// Toolpath generation was rejected.
    #[error(transparent)]
    Toolpath(#[from] CamToolError),

    /// The configuration is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Build an importer honoring the construction color and flatness settings.
pub fn importer_for(config: &Config) -> SvgImporter {
    SvgImporter::new()
        .with_construction_color(Some(config.import.construction_color.as_str()))
        .with_flatness(config.import.flatness)
}

/// Turn an imported document into the instruction sequence.
///
/// A `document_height` of zero or less in the cutting parameters is replaced
/// by the height read from the document, so the Y flip maps the top edge of
/// the drawing to machine Y = 0.
pub fn generate_program(
    document: &ImportedDocument,
    config: &Config,
) -> Result<Vec<GcodeCommand>, ConvertError> {
    let mut params = config.cutting.clone();
    if params.document_height <= 0.0 {
        params.document_height = document.height;
    }
    if document.is_empty() {
        warn!("No cuttable geometry found; output contains no motion");
    }

    let program = ToolpathGenerator::new(params)
        .with_header(config.output.header)
        .generate(&document.entities)?;
    info!(
        "Converted {} entities ({} skipped, {} construction) into {} instructions",
        document.entities.len(),
        document.skipped,
        document.filtered,
        program.len()
    );
    Ok(program)
}

/// Convert SVG text into G-code text using `config`.
pub fn convert_svg(svg: &str, config: &Config) -> Result<String, ConvertError> {
    config.validate()?;
    let document = importer_for(config).import_string(svg)?;
    let program = generate_program(&document, config)?;
    Ok(GcodeWriter::new(config.output.decimals).write_program(&program))
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, leaving stdout free for G-code
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
