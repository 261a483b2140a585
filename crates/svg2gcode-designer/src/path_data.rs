//! SVG path data interpreter.
//!
//! Supports the restricted command set `M/m L/l H/h V/v C/c Z/z`. Path data is
//! tokenized into command letters and numeric tokens, then executed by a small
//! state machine holding the active command, the current point and the start
//! point. Cubic curves are flattened with [`crate::bezier`].
//!
//! All subpaths of one `d` attribute are collected into a single polyline.
//! Paths containing any other command letter must be filtered out with
//! [`find_unsupported_command`] before interpretation.

use crate::bezier::{CubicBezier, DEFAULT_FLATNESS};
use std::fmt::Write;
use svg2gcode_core::{PathSyntaxError, Point};

/// Command letters understood by the interpreter.
pub const SUPPORTED_COMMANDS: &str = "MmLlHhVvCcZz";

/// Kind of a path command, independent of absolute/relative form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    CurveTo,
    Close,
}

/// A command letter decoded into its kind and relativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub letter: char,
}

impl PathCommand {
    /// Decodes a supported command letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalTo,
            'V' => CommandKind::VerticalTo,
            'C' => CommandKind::CurveTo,
            'Z' => CommandKind::Close,
            _ => return None,
        };
        Some(Self {
            kind,
            relative: letter.is_ascii_lowercase(),
            letter,
        })
    }

    /// Number of numeric tokens consumed per repetition.
    pub fn arity(&self) -> usize {
        match self.kind {
            CommandKind::MoveTo | CommandKind::LineTo => 2,
            CommandKind::HorizontalTo | CommandKind::VerticalTo => 1,
            CommandKind::CurveTo => 6,
            CommandKind::Close => 0,
        }
    }

    /// The command implied by extra coordinate pairs after a move.
    fn implicit_successor(&self) -> Self {
        match self.kind {
            CommandKind::MoveTo => Self {
                kind: CommandKind::LineTo,
                relative: self.relative,
                letter: if self.relative { 'l' } else { 'L' },
            },
            _ => *self,
        }
    }
}

/// A lexical token of path data.
#[derive(Debug, Clone, PartialEq)]
pub enum PathToken {
    Command(PathCommand),
    Value(String),
}

impl PathToken {
    fn is_command(&self) -> bool {
        matches!(self, PathToken::Command(_))
    }
}

/// Result of interpreting one path: ordered points plus the closed flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedPath {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl ParsedPath {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Returns the first command letter in `data` that the interpreter does not support.
///
/// An `e`/`E` directly after a digit or `.` is an exponent, not a command.
pub fn find_unsupported_command(data: &str) -> Option<char> {
    let mut prev: Option<char> = None;
    for ch in data.chars() {
        if ch.is_ascii_alphabetic() && !SUPPORTED_COMMANDS.contains(ch) {
            let exponent = matches!(ch, 'e' | 'E')
                && prev.is_some_and(|p| p.is_ascii_digit() || p == '.');
            if !exponent {
                return Some(ch);
            }
        }
        prev = Some(ch);
    }
    None
}

/// Returns true if `data` contains command letters outside [`SUPPORTED_COMMANDS`].
pub fn has_unsupported_commands(data: &str) -> bool {
    find_unsupported_command(data).is_some()
}

/// Splits a run of numeric text on separators (whitespace, commas), on a
/// sign that starts a new number (`10-5` is `10`, `-5`) and on a second
/// decimal point (`.5.5` is `.5`, `.5`).
fn split_numbers(text: &str, out: &mut Vec<String>) {
    let mut current = String::new();
    for ch in text.chars() {
        match ch {
            '.' if current.contains(['.', 'e', 'E']) => {
                out.push(std::mem::take(&mut current));
                current.push(ch);
            }
            c if c.is_whitespace() || c == ',' => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            '-' | '+' => {
                let after_exponent = current.ends_with(['e', 'E']);
                if !current.is_empty() && !after_exponent {
                    out.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Tokenizes path data into command letters and numeric tokens.
pub fn tokenize(data: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut numbers = Vec::new();
    let mut run_start = 0;

    for (idx, ch) in data.char_indices() {
        if let Some(cmd) = PathCommand::from_letter(ch) {
            split_numbers(&data[run_start..idx], &mut numbers);
            tokens.extend(numbers.drain(..).map(PathToken::Value));
            tokens.push(PathToken::Command(cmd));
            run_start = idx + ch.len_utf8();
        }
    }
    split_numbers(&data[run_start..], &mut numbers);
    tokens.extend(numbers.into_iter().map(PathToken::Value));
    tokens
}

fn parse_number(token: &str) -> Result<f64, PathSyntaxError> {
    token
        .parse::<f64>()
        .map_err(|_| PathSyntaxError::InvalidNumber {
            token: token.to_string(),
        })
}

/// Parses an SVG `points` attribute (`polyline`/`polygon`) into points.
pub fn parse_points_list(data: &str) -> Result<Vec<Point>, PathSyntaxError> {
    let mut fields = Vec::new();
    split_numbers(data, &mut fields);
    if fields.len() % 2 != 0 {
        return Err(PathSyntaxError::OddCoordinateCount {
            found: fields.len(),
        });
    }
    fields
        .chunks_exact(2)
        .map(|pair| Ok(Point::new(parse_number(&pair[0])?, parse_number(&pair[1])?)))
        .collect()
}

/// Mutable interpreter state.
#[derive(Debug, Default)]
struct PathState {
    points: Vec<Point>,
    current: Point,
    start: Point,
    closed: bool,
}

impl PathState {
    fn push(&mut self, p: Point) {
        if self.points.is_empty() {
            self.start = p;
        }
        self.points.push(p);
        self.current = p;
    }

    fn resolve(&self, cmd: &PathCommand, x: f64, y: f64) -> Point {
        if cmd.relative {
            Point::new(self.current.x + x, self.current.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn close(&mut self) {
        if !self.points.is_empty() {
            self.points.push(self.start);
            self.closed = true;
        }
    }
}

/// Interpreter for the restricted path mini-language.
#[derive(Debug, Clone, Copy)]
pub struct PathInterpreter {
    flatness: f64,
}

impl Default for PathInterpreter {
    fn default() -> Self {
        Self {
            flatness: DEFAULT_FLATNESS,
        }
    }
}

impl PathInterpreter {
    /// Creates an interpreter with the default flatness tolerance (0.1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an interpreter with a custom curve flatness tolerance.
    pub fn with_flatness(flatness: f64) -> Self {
        Self { flatness }
    }

    pub fn flatness(&self) -> f64 {
        self.flatness
    }

    /// Interprets `data` into an ordered point sequence and a closed flag.
    ///
    /// Empty input yields an empty, open path.
    pub fn parse(&self, data: &str) -> Result<ParsedPath, PathSyntaxError> {
        let tokens = tokenize(data);
        let mut state = PathState::default();
        let mut active: Option<PathCommand> = None;
        let mut i = 0;

        while i < tokens.len() {
            let cmd = match &tokens[i] {
                PathToken::Command(cmd) => {
                    i += 1;
                    active = Some(*cmd);
                    if cmd.kind == CommandKind::Close {
                        state.close();
                    } else {
                        // A command must be followed by at least one group.
                        Self::take_values(&tokens, i, cmd)?;
                    }
                    continue;
                }
                PathToken::Value(token) => match active {
                    Some(cmd) if cmd.kind == CommandKind::Close => {
                        return Err(PathSyntaxError::UnexpectedCoordinate {
                            command: cmd.letter,
                            token: token.clone(),
                        });
                    }
                    Some(cmd) => cmd,
                    None => return Err(PathSyntaxError::MissingCommand),
                },
            };

            let values = Self::take_values(&tokens, i, &cmd)?;
            i += values.len();

            match cmd.kind {
                CommandKind::MoveTo | CommandKind::LineTo => {
                    let p = state.resolve(&cmd, values[0], values[1]);
                    state.push(p);
                    active = Some(cmd.implicit_successor());
                }
                CommandKind::HorizontalTo => {
                    let x = if cmd.relative {
                        state.current.x + values[0]
                    } else {
                        values[0]
                    };
                    state.push(Point::new(x, state.current.y));
                }
                CommandKind::VerticalTo => {
                    let y = if cmd.relative {
                        state.current.y + values[0]
                    } else {
                        values[0]
                    };
                    state.push(Point::new(state.current.x, y));
                }
                CommandKind::CurveTo => {
                    let c1 = state.resolve(&cmd, values[0], values[1]);
                    let c2 = state.resolve(&cmd, values[2], values[3]);
                    let end = state.resolve(&cmd, values[4], values[5]);
                    let mut flattened = Vec::new();
                    CubicBezier::new(state.current, c1, c2, end)
                        .flatten_into(self.flatness, &mut flattened);
                    for p in flattened {
                        state.push(p);
                    }
                }
                CommandKind::Close => unreachable!("close takes no coordinates"),
            }
        }

        Ok(ParsedPath {
            points: state.points,
            closed: state.closed,
        })
    }

    /// Collects and parses the next `cmd.arity()` numeric tokens starting at `i`.
    ///
    /// Counts before parsing, so a short group reports the missing count rather
    /// than trying to parse the following command letter.
    fn take_values(
        tokens: &[PathToken],
        i: usize,
        cmd: &PathCommand,
    ) -> Result<Vec<f64>, PathSyntaxError> {
        let arity = cmd.arity();
        let available = tokens[i.min(tokens.len())..]
            .iter()
            .take(arity)
            .take_while(|t| !t.is_command())
            .count();

        if available < arity {
            return Err(if cmd.kind == CommandKind::CurveTo {
                PathSyntaxError::IncompleteCurve {
                    command: cmd.letter,
                    found: available,
                }
            } else {
                PathSyntaxError::MissingCoordinates {
                    command: cmd.letter,
                    expected: arity,
                    found: available,
                }
            });
        }

        tokens[i..i + arity]
            .iter()
            .map(|t| match t {
                PathToken::Value(v) => parse_number(v),
                PathToken::Command(_) => unreachable!("counted as value above"),
            })
            .collect()
    }
}

/// Interprets path data with the default flatness tolerance.
pub fn parse_path_data(data: &str) -> Result<ParsedPath, PathSyntaxError> {
    PathInterpreter::new().parse(data)
}

/// Writes a point sequence back out as canonical path data.
///
/// Re-interpreting the output reproduces the same point sequence: a closed
/// sequence that ends on its start point is written without that last point,
/// followed by `Z`.
pub fn format_path_data(points: &[Point], closed: bool) -> String {
    let ends_at_start =
        points.len() > 1 && points.first().zip(points.last()).is_some_and(|(a, b)| a == b);
    let emit_close = closed && ends_at_start;
    let body = if emit_close {
        &points[..points.len() - 1]
    } else {
        points
    };

    let mut out = String::new();
    for (idx, p) in body.iter().enumerate() {
        let letter = if idx == 0 { 'M' } else { 'L' };
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}{},{}", letter, p.x, p.y);
    }
    if emit_close {
        out.push_str(" Z");
    }
    out
}
