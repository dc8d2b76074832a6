//! Simple polygons as ordered vertex lists.
//!
//! Invariants
//! - At least 3 vertices, consistently traversing the boundary.
//! - `winding` is the sign of the shoelace sum (`+1` CCW, `-1` CW; a zero sum
//!   counts as `+1`). It is recomputed by every constructor and by `reversed`.

use nalgebra::Vector2;

use super::util::signed_area;
use crate::error::BlendError;

/// Ordered polygon with cached orientation and area.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    points: Vec<Vector2<f64>>,
    signed_area: f64,
}

impl Polygon {
    pub fn new(points: Vec<Vector2<f64>>) -> Result<Self, BlendError> {
        if points.len() < 3 {
            return Err(BlendError::TooFewVertices {
                count: points.len(),
            });
        }
        let signed_area = signed_area(&points);
        Ok(Self {
            points,
            signed_area,
        })
    }

    pub fn from_xy(xy: &[[f64; 2]]) -> Result<Self, BlendError> {
        Self::new(xy.iter().map(|p| Vector2::new(p[0], p[1])).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed polygon; kept for slice-like ergonomics.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// Unsigned shoelace area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    #[inline]
    pub fn winding(&self) -> i8 {
        if self.signed_area < 0.0 {
            -1
        } else {
            1
        }
    }

    /// Same boundary traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            points,
            signed_area: -self.signed_area,
        }
    }

    /// Cyclic relabel: vertex `k` becomes vertex 0.
    pub fn rotated(&self, k: usize) -> Self {
        let mut points = self.points.clone();
        points.rotate_left(k % self.points.len());
        Self {
            points,
            signed_area: self.signed_area,
        }
    }

    /// False if any coordinate is NaN or infinite; renderers should skip such output.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    pub fn to_xy(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }

    #[inline]
    pub(crate) fn prev_idx(&self, i: usize) -> usize {
        (i + self.points.len() - 1) % self.points.len()
    }

    #[inline]
    pub(crate) fn next_idx(&self, i: usize) -> usize {
        (i + 1) % self.points.len()
    }

    /// Interpolation output is built vertex-by-vertex and may be non-finite.
    pub(crate) fn from_raw(points: Vec<Vector2<f64>>) -> Self {
        let signed_area = signed_area(&points);
        Self {
            points,
            signed_area,
        }
    }
}
