//! Affine transform algebra.
//!
//! A [`Transform`] is the 2x3 matrix `[a c e; b d f]`. Composition follows the
//! SVG group convention: `outer.compose(&inner)` applies `inner` first, so
//! `outer.compose(&inner).apply(p) == outer.apply(inner.apply(p))`.

use crate::point::Point;
use serde::{Deserialize, Serialize};

/// 2x3 affine matrix `[a c e; b d f]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a transform from its six coefficients.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The neutral transform.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Pure translation by `(tx, ty)`.
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns `self ∘ inner`: the result applies `inner` first, then `self`.
    pub fn compose(&self, inner: &Transform) -> Transform {
        Transform {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    /// Maps a point through the matrix.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Maps every point of a polyline in place.
    pub fn apply_all(&self, points: &mut [Point]) {
        for p in points.iter_mut() {
            *p = self.apply(*p);
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}
