//! Geometry entities produced by the importer.

use serde::{Deserialize, Serialize};
use svg2gcode_core::{Point, Transform};

use crate::path_data::ParsedPath;

/// One drawable element reduced to a polyline.
///
/// `color` is the normalized stroke label and is only used for filtering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryEntity {
    pub points: Vec<Point>,
    pub closed: bool,
    pub color: String,
}

impl GeometryEntity {
    /// Builds an entity, marking it closed when `closed` is set or the
    /// sequence returns to its first point.
    pub fn new(points: Vec<Point>, closed: bool, color: impl Into<String>) -> Self {
        let closed = closed || Self::ends_at_start(&points);
        Self {
            points,
            closed,
            color: color.into(),
        }
    }

    /// Builds an entity from interpreted path data.
    pub fn from_parsed(parsed: ParsedPath, color: impl Into<String>) -> Self {
        Self::new(parsed.points, parsed.closed, color)
    }

    /// Builds a closed entity, appending the first point unless the
    /// sequence already ends on it.
    pub fn closed_polygon(mut points: Vec<Point>, color: impl Into<String>) -> Self {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
            if !first.approx_eq(last) {
                points.push(first);
            }
        }
        Self {
            points,
            closed: true,
            color: color.into(),
        }
    }

    fn ends_at_start(points: &[Point]) -> bool {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() > 2 => first.approx_eq(last),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Maps every point through `transform`.
    pub fn transform(&mut self, transform: &Transform) {
        if !transform.is_identity() {
            transform.apply_all(&mut self.points);
        }
    }
}
