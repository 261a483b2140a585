//! G-code instruction model and text serialization.

use std::fmt;
use std::io::Write;

use svg2gcode_core::Units;

/// Decimal places used when no precision is configured.
pub const DEFAULT_PRECISION: usize = 3;

/// A single motion or modal instruction
#[derive(Debug, Clone, PartialEq)]
pub enum GcodeCommand {
    /// Human-readable marker
    Comment(String),
    /// `G21` / `G20`
    SetUnits(Units),
    /// `G90`
    AbsoluteMode,
    /// `G0` rapid traverse
    Rapid {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    },
    /// `G1` linear feed move
    Linear {
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        feed: f64,
    },
    /// `M5`
    SpindleStop,
    /// `M2`
    ProgramEnd,
}

impl GcodeCommand {
    pub fn comment(text: impl Into<String>) -> Self {
        GcodeCommand::Comment(text.into())
    }

    pub fn rapid_xy(x: f64, y: f64) -> Self {
        GcodeCommand::Rapid {
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    pub fn rapid_z(z: f64) -> Self {
        GcodeCommand::Rapid {
            x: None,
            y: None,
            z: Some(z),
        }
    }

    pub fn linear_xy(x: f64, y: f64, feed: f64) -> Self {
        GcodeCommand::Linear {
            x: Some(x),
            y: Some(y),
            z: None,
            feed,
        }
    }

    pub fn plunge(z: f64, feed: f64) -> Self {
        GcodeCommand::Linear {
            x: None,
            y: None,
            z: Some(z),
            feed,
        }
    }

    /// True for `G0`/`G1` moves.
    pub fn is_motion(&self) -> bool {
        matches!(self, GcodeCommand::Rapid { .. } | GcodeCommand::Linear { .. })
    }
}

impl fmt::Display for GcodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GcodeWriter::default().format_command(self))
    }
}

/// Formats a number with fixed decimals, never printing a negative zero.
fn format_number(value: f64, precision: usize) -> String {
    let s = format!("{value:.precision$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

/// Serializes instructions to G-code text
#[derive(Debug, Clone, Copy)]
pub struct GcodeWriter {
    precision: usize,
}

impl Default for GcodeWriter {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl GcodeWriter {
    /// Create a writer using `precision` decimal places
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    fn push_axes(&self, line: &mut String, x: Option<f64>, y: Option<f64>, z: Option<f64>) {
        for (word, value) in [('X', x), ('Y', y), ('Z', z)] {
            if let Some(v) = value {
                line.push(' ');
                line.push(word);
                line.push_str(&format_number(v, self.precision));
            }
        }
    }

    /// Format one instruction as a single line (no trailing newline)
    pub fn format_command(&self, command: &GcodeCommand) -> String {
        match command {
            GcodeCommand::Comment(text) => format!("; {text}"),
            GcodeCommand::SetUnits(units) => {
                let name = match units {
                    Units::Mm => "millimeters",
                    Units::Inch => "inches",
                };
                format!("{} ; Set units to {name}", units.gcode_word())
            }
            GcodeCommand::AbsoluteMode => "G90 ; Absolute positioning".to_string(),
            GcodeCommand::Rapid { x, y, z } => {
                let mut line = String::from("G0");
                self.push_axes(&mut line, *x, *y, *z);
                line
            }
            GcodeCommand::Linear { x, y, z, feed } => {
                let mut line = String::from("G1");
                self.push_axes(&mut line, *x, *y, *z);
                line.push_str(" F");
                line.push_str(&format_number(*feed, self.precision));
                line
            }
            GcodeCommand::SpindleStop => "M5 ; Stop spindle".to_string(),
            GcodeCommand::ProgramEnd => "M2 ; End program".to_string(),
        }
    }

    /// Format a whole program, one instruction per line
    pub fn write_program(&self, commands: &[GcodeCommand]) -> String {
        let mut out = String::new();
        for command in commands {
            out.push_str(&self.format_command(command));
            out.push('\n');
        }
        out
    }

    /// Stream a program to `sink`
    pub fn write_to<W: Write>(&self, commands: &[GcodeCommand], sink: &mut W) -> std::io::Result<()> {
        for command in commands {
            writeln!(sink, "{}", self.format_command(command))?;
        }
        sink.flush()
    }
}
