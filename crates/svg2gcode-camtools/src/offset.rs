//! Polygon offsetting for cutter compensation.
//!
//! Each edge is shifted along its normal by `delta` and consecutive shifted
//! edges are intersected to form the new vertices. Corners are neither rounded
//! nor mitre-limited, and self-intersections on tight concave features are
//! left as they are.
//!
//! Degenerate input never fails: fewer than three distinct points, a zero
//! delta or a zero-area polygon return the input unchanged.

use svg2gcode_core::Point;
use tracing::debug;

/// Below this absolute signed area a polygon is treated as degenerate.
pub const AREA_EPSILON: f64 = 1e-9;

/// Below this absolute cross product two edges are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Which side of the outline the tool keeps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSide {
    /// Shrink toward the interior
    Inside,
    /// Grow away from the interior
    Outside,
}

/// Signed shoelace area. Positive for counter-clockwise winding in a Y-up frame.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}

/// Offsets a polygon by `delta` toward `side`.
///
/// `points` may or may not repeat its first point at the end. The result
/// always does.
pub fn offset_polygon(points: &[Point], delta: f64, side: OffsetSide) -> Vec<Point> {
    if delta == 0.0 || points.len() < 3 {
        return points.to_vec();
    }

    let poly = match (points.first(), points.last()) {
        (Some(first), Some(last)) if first.approx_eq(last) => &points[..points.len() - 1],
        _ => points,
    };
    let n = poly.len();
    if n < 3 {
        debug!("Offset skipped: {} distinct points", n);
        return points.to_vec();
    }

    let area = signed_area(poly);
    if area.abs() < AREA_EPSILON {
        debug!("Offset skipped: degenerate area {:e}", area);
        return points.to_vec();
    }

    let mut dirs = Vec::with_capacity(n);
    let mut normals = Vec::with_capacity(n);
    for j in 0..n {
        let edge = poly[(j + 1) % n] - poly[j];
        let mut len = edge.length();
        if len == 0.0 {
            len = 1.0;
        }
        let interior = if area > 0.0 {
            Point::new(-edge.y / len, edge.x / len)
        } else {
            Point::new(edge.y / len, -edge.x / len)
        };
        dirs.push(edge);
        normals.push(match side {
            OffsetSide::Inside => interior,
            OffsetSide::Outside => -interior,
        });
    }

    let mut result = Vec::with_capacity(n + 1);
    for i in 0..n {
        let prev = (i + n - 1) % n;
        let e0 = dirs[prev];
        let e1 = dirs[i];
        let q0 = poly[prev] + normals[prev] * delta;
        let q1 = poly[i] + normals[i] * delta;

        let denom = e0.cross(&e1);
        if denom.abs() < PARALLEL_EPSILON {
            result.push(q1);
            continue;
        }
        let t = -(q0 - q1).cross(&e1) / denom;
        result.push(q0 + e0 * t);
    }

    if let Some(&first) = result.first() {
        result.push(first);
    }
    result
}
