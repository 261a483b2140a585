//! svg2gcode CLI - convert SVG drawings into G-code toolpaths
//!
//! Command-line flags override the configuration file, which overrides the
//! built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use svg2gcode::{
    generate_program, importer_for, init_logging, Compensation, Config, GcodeWriter, Units,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "svg2gcode", version)]
#[command(about = "Convert SVG paths into G-code toolpaths", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Input SVG file
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Output G-code file ("-" or absent writes to stdout)
    #[arg(long = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file (.toml or .json); defaults to the platform config location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Safe travel height
    #[arg(long)]
    safez: Option<f64>,

    /// Final cut depth, must be negative
    #[arg(long)]
    cutz: Option<f64>,

    /// Depth per pass; 0 cuts to full depth in one pass
    #[arg(long)]
    stepdown: Option<f64>,

    /// Feed rate for XY cutting moves
    #[arg(long)]
    feed: Option<f64>,

    /// Feed rate for plunges
    #[arg(long)]
    plunge: Option<f64>,

    /// Scale factor from SVG units to machine units
    #[arg(long)]
    scale: Option<f64>,

    /// Cutter compensation: none, inside or outside
    #[arg(long)]
    comp: Option<Compensation>,

    /// Tool diameter in machine units
    #[arg(long)]
    tooldia: Option<f64>,

    /// Machine units: mm or in
    #[arg(long)]
    units: Option<Units>,

    /// Stroke color of construction geometry to ignore, or "none"
    #[arg(long, value_name = "COLOR")]
    construction: Option<String>,

    /// Decimal places in the output
    #[arg(long)]
    decimals: Option<usize>,

    /// Omit the parameter summary comments
    #[arg(long)]
    no_header: bool,

    /// Save the effective configuration to this file and continue
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load_default().context("Failed to load default config")?,
        };
        self.apply_overrides(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        let cutting = &mut config.cutting;
        if let Some(v) = self.safez {
            cutting.safe_z = v;
        }
        if let Some(v) = self.cutz {
            cutting.cut_depth = v;
        }
        if let Some(v) = self.stepdown {
            cutting.step_down = v;
        }
        if let Some(v) = self.feed {
            cutting.feed_rate = v;
        }
        if let Some(v) = self.plunge {
            cutting.plunge_rate = v;
        }
        if let Some(v) = self.scale {
            cutting.scale = v;
        }
        if let Some(v) = self.comp {
            cutting.compensation = v;
        }
        if let Some(v) = self.tooldia {
            cutting.tool_diameter = v;
        }
        if let Some(v) = self.units {
            cutting.units = v;
        }
        if let Some(color) = &self.construction {
            config.import.construction_color = color.clone();
        }
        if let Some(v) = self.decimals {
            config.output.decimals = v;
        }
        if self.no_header {
            config.output.header = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    debug!("svg2gcode {} (built {})", svg2gcode::VERSION, svg2gcode::BUILD_DATE);

    let config = cli.load_config()?;
    if let Some(path) = &cli.write_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    let document = importer_for(&config)
        .import_file(&cli.input)
        .with_context(|| format!("Failed to import {}", cli.input.display()))?;
    let program = generate_program(&document, &config)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    let writer = GcodeWriter::new(config.output.decimals);
    match cli.output.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            writer
                .write_to(&program, &mut BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote G-code to {}", path.display());
        }
        _ => {
            writer
                .write_to(&program, &mut std::io::stdout().lock())
                .context("Failed to write G-code to stdout")?;
        }
    }

    Ok(())
}
