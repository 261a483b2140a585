//! Cubic Bézier flattening.
//!
//! Recursive De Casteljau subdivision until both control handles lie within
//! the flatness tolerance of the chord. The recursion is capped at
//! [`MAX_SUBDIVISION_DEPTH`]; a segment that reaches the cap is treated as
//! flat enough so the flattener stays total on pathological input.

use svg2gcode_core::Point;

/// Flatness tolerance used by the path interpreter (document units).
pub const DEFAULT_FLATNESS: f64 = 0.1;

/// Maximum subdivision depth. 2^24 segments is far beyond any useful resolution.
pub const MAX_SUBDIVISION_DEPTH: u32 = 24;

/// A cubic Bézier segment from `p0` to `p3` with handles `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// Largest perpendicular distance of the handles to the chord `p0`–`p3`.
    pub fn flatness(&self) -> f64 {
        let d1 = self.p1.distance_to_line(&self.p0, &self.p3);
        let d2 = self.p2.distance_to_line(&self.p0, &self.p3);
        d1.max(d2)
    }

    /// Splits the curve at t = 0.5.
    pub fn subdivide(&self) -> (CubicBezier, CubicBezier) {
        let m01 = self.p0.lerp(&self.p1, 0.5);
        let m12 = self.p1.lerp(&self.p2, 0.5);
        let m23 = self.p2.lerp(&self.p3, 0.5);
        let m012 = m01.lerp(&m12, 0.5);
        let m123 = m12.lerp(&m23, 0.5);
        let mid = m012.lerp(&m123, 0.5);
        (
            CubicBezier::new(self.p0, m01, m012, mid),
            CubicBezier::new(mid, m123, m23, self.p3),
        )
    }

    /// Flattens the curve into `out`.
    ///
    /// `p0` is not emitted (the caller already holds it); the last point
    /// pushed is always exactly `p3`.
    pub fn flatten_into(&self, tolerance: f64, out: &mut Vec<Point>) {
        self.flatten_recursive(tolerance, 0, out);
    }

    /// Flattens the curve into a new vector. See [`CubicBezier::flatten_into`].
    pub fn flatten(&self, tolerance: f64) -> Vec<Point> {
        let mut out = Vec::new();
        self.flatten_into(tolerance, &mut out);
        out
    }

    fn flatten_recursive(&self, tolerance: f64, depth: u32, out: &mut Vec<Point>) {
        if self.flatness() <= tolerance || depth >= MAX_SUBDIVISION_DEPTH {
            out.push(self.p3);
            return;
        }
        let (left, right) = self.subdivide();
        left.flatten_recursive(tolerance, depth + 1, out);
        right.flatten_recursive(tolerance, depth + 1, out);
    }
}
