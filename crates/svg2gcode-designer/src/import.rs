//! # SVG Import
//!
//! Walks an SVG document and reduces its `<path>`, `<polyline>` and
//! `<polygon>` elements to [`GeometryEntity`] values.
//!
//! Group context is tracked with an explicit stack of frames pushed on `<g>`
//! entry and popped on exit. Each frame holds the accumulated transform
//! (parent composed with the group's own) and the inherited stroke color.
//! Only `translate(...)` transforms are honored.
//!
//! Entities whose color equals the construction color are dropped.

use std::fmt;
use std::path::Path;

use roxmltree::{Document, Node};
use svg2gcode_core::{PathSyntaxError, Transform};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::GeometryEntity;
use crate::path_data::{find_unsupported_command, parse_points_list, PathInterpreter};
use crate::style::{excerpt, extract_stroke_color, normalize_color, parse_length, parse_transform_attr};

/// Construction color filtered out by default.
pub const DEFAULT_CONSTRUCTION_COLOR: &str = "#0000ff";

/// Number of characters of offending data quoted in syntax errors.
pub const EXCERPT_LENGTH: usize = 40;

/// Kind of geometry element in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Path,
    Polyline,
    Polygon,
}

impl ElementKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "path" => Some(Self::Path),
            "polyline" => Some(Self::Polyline),
            "polygon" => Some(Self::Polygon),
            _ => None,
        }
    }

    fn data_attribute(&self) -> &'static str {
        match self {
            Self::Path => "d",
            Self::Polyline | Self::Polygon => "points",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "<path>"),
            Self::Polyline => write!(f, "<polyline>"),
            Self::Polygon => write!(f, "<polygon>"),
        }
    }
}

/// Errors raised while importing an SVG document
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document is not well-formed XML
    #[error("failed to parse SVG document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Geometry data of one element is malformed
    #[error("{element} #{index} data={excerpt:?}: {source}")]
    Syntax {
        /// Element kind.
        element: ElementKind,
        /// Zero-based index among geometry elements in document order.
        index: usize,
        /// Leading characters of the offending data.
        excerpt: String,
        /// Underlying syntax error.
        #[source]
        source: PathSyntaxError,
    },

    /// The input file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Geometry extracted from one SVG document.
#[derive(Debug, Clone, Default)]
pub struct ImportedDocument {
    /// Entities in document order.
    pub entities: Vec<GeometryEntity>,
    /// Document width from `viewBox`, else the `width` attribute.
    pub width: f64,
    /// Document height from `viewBox`, else the `height` attribute.
    pub height: f64,
    /// Paths skipped for using unsupported commands.
    pub skipped: usize,
    /// Entities dropped by the construction color filter.
    pub filtered: usize,
}

impl ImportedDocument {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Parses a construction color setting; `none` or an empty value disables the filter.
pub fn parse_construction_color(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        normalize_color(value)
    }
}

#[derive(Debug, Clone, Default)]
struct Frame {
    transform: Transform,
    color: Option<String>,
}

/// SVG importer producing geometry entities
#[derive(Debug, Clone)]
pub struct SvgImporter {
    construction_color: Option<String>,
    interpreter: PathInterpreter,
}

impl Default for SvgImporter {
    fn default() -> Self {
        Self {
            construction_color: Some(DEFAULT_CONSTRUCTION_COLOR.to_string()),
            interpreter: PathInterpreter::new(),
        }
    }
}

impl SvgImporter {
    /// Create an importer with the default construction color filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the construction color filter. `None`, `"none"` or `""` disables it.
    pub fn with_construction_color(mut self, color: Option<&str>) -> Self {
        self.construction_color = color.and_then(parse_construction_color);
        self
    }

    /// Set the curve flatness tolerance
    pub fn with_flatness(mut self, flatness: f64) -> Self {
        self.interpreter = PathInterpreter::with_flatness(flatness);
        self
    }

    /// Import SVG from a file
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportedDocument> {
        let path = path.as_ref();
        debug!("Importing SVG file: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.import_string(&content)
    }

    /// Import SVG from string content
    pub fn import_string(&self, svg_content: &str) -> Result<ImportedDocument> {
        let doc = Document::parse(svg_content)?;
        let root = doc.root_element();
        let mut result = ImportedDocument::default();
        Self::read_dimensions(root, &mut result);

        let mut frames = vec![Frame::default()];
        let mut index = 0;
        self.walk(root, &mut frames, &mut index, &mut result)?;

        if result.is_empty() {
            warn!("SVG document contains no usable geometry");
        } else {
            info!(
                "Imported {} entities ({} skipped, {} construction)",
                result.entities.len(),
                result.skipped,
                result.filtered
            );
        }
        Ok(result)
    }

    /// Visits the element children of `node` in document order. A `<g>`
    /// pushes its frame before its children are visited and pops it after.
    fn walk(
        &self,
        node: Node<'_, '_>,
        frames: &mut Vec<Frame>,
        index: &mut usize,
        result: &mut ImportedDocument,
    ) -> Result<()> {
        for child in node.children().filter(|n| n.is_element()) {
            let current = frames.last().cloned().unwrap_or_default();
            let tag = child.tag_name().name();
            if tag == "g" {
                frames.push(Frame {
                    transform: Self::element_transform(child, &current.transform),
                    color: extract_stroke_color(child.attribute("stroke"), child.attribute("style"))
                        .or(current.color),
                });
                let walked = self.walk(child, frames, index, result);
                frames.pop();
                walked?;
            } else if let Some(kind) = ElementKind::from_tag(tag) {
                let entity = self.import_element(child, kind, *index, &current, result)?;
                *index += 1;
                if let Some(entity) = entity {
                    self.collect(entity, result);
                }
            } else {
                self.walk(child, frames, index, result)?;
            }
        }
        Ok(())
    }

    fn read_dimensions(svg: Node<'_, '_>, result: &mut ImportedDocument) {
        let view_box = svg.attribute("viewBox").and_then(|vb| {
            let parts: Vec<f64> = vb
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|p| !p.is_empty())
                .map(|p| p.parse::<f64>())
                .collect::<std::result::Result<_, _>>()
                .ok()?;
            (parts.len() == 4).then(|| (parts[2], parts[3]))
        });

        let (width, height) = view_box.unwrap_or_else(|| {
            (
                svg.attribute("width").and_then(parse_length).unwrap_or(0.0),
                svg.attribute("height").and_then(parse_length).unwrap_or(0.0),
            )
        });
        result.width = width;
        result.height = height;
        debug!("Document size {} x {}", width, height);
    }

    fn element_transform(node: Node<'_, '_>, parent: &Transform) -> Transform {
        match node.attribute("transform") {
            Some(attr) => parent.compose(&parse_transform_attr(attr)),
            None => *parent,
        }
    }

    fn import_element(
        &self,
        node: Node<'_, '_>,
        kind: ElementKind,
        index: usize,
        frame: &Frame,
        result: &mut ImportedDocument,
    ) -> Result<Option<GeometryEntity>> {
        let data = node.attribute(kind.data_attribute()).unwrap_or("").trim();
        let syntax_error = |source| ImportError::Syntax {
            element: kind,
            index,
            excerpt: excerpt(data, EXCERPT_LENGTH),
            source,
        };

        let color = extract_stroke_color(node.attribute("stroke"), node.attribute("style"))
            .or_else(|| frame.color.clone())
            .unwrap_or_default();

        let mut entity = match kind {
            ElementKind::Path => {
                if data.is_empty() {
                    return Ok(None);
                }
                if let Some(command) = find_unsupported_command(data) {
                    warn!(
                        "Skipping {} #{}: unsupported command '{}' in {:?}",
                        kind,
                        index,
                        command,
                        excerpt(data, EXCERPT_LENGTH)
                    );
                    result.skipped += 1;
                    return Ok(None);
                }
                let parsed = self.interpreter.parse(data).map_err(syntax_error)?;
                GeometryEntity::from_parsed(parsed, color)
            }
            ElementKind::Polyline => {
                let points = parse_points_list(data).map_err(syntax_error)?;
                GeometryEntity::new(points, false, color)
            }
            ElementKind::Polygon => {
                let points = parse_points_list(data).map_err(syntax_error)?;
                GeometryEntity::closed_polygon(points, color)
            }
        };

        if entity.is_empty() {
            return Ok(None);
        }
        entity.transform(&Self::element_transform(node, &frame.transform));
        Ok(Some(entity))
    }

    fn collect(&self, entity: GeometryEntity, result: &mut ImportedDocument) {
        if self.construction_color.as_deref() == Some(entity.color.as_str()) {
            debug!("Dropping construction geometry ({} points)", entity.len());
            result.filtered += 1;
            return;
        }
        debug!(
            "Entity {}: {} points, closed={}, stroke={:?}",
            result.entities.len(),
            entity.len(),
            entity.closed,
            entity.color
        );
        result.entities.push(entity);
    }
}
