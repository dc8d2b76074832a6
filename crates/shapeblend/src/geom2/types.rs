//! Basic 2D types and tolerances used across the blend pipeline.
//!
//! - `GeomCfg`: centralizes epsilons for degenerate edges, similarity
//!   denominators, score floors and basis conditioning.
//! - `Affine2`: 2D affine map `x ↦ M x + t` with a rotation/residual split.
//!
//! Code cross-refs: `intrinsics::precompute`, `basis::smooth_a`, `interp::MorphPlan`

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeomCfg {
    /// Incident edges shorter than this give a corner with all angles 0.
    pub eps_edge: f64,
    /// Edge-ratio similarity is 1 when its denominator falls below this.
    pub eps_sim_den: f64,
    /// Basis candidates scoring at or below this are discarded.
    pub eps_score: f64,
    /// Guard for area-ratio denominators.
    pub eps_area: f64,
    /// Corners at or below this angle (degrees) cannot anchor a basis.
    pub min_corner_deg: f64,
    /// Corners at or above this angle (degrees) cannot anchor a basis.
    pub max_corner_deg: f64,
    /// Minimal basis triangle area as a fraction of the polygon area.
    pub eps_basis_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_edge: 1e-6,
            eps_sim_den: 1e-9,
            eps_score: 1e-7,
            eps_area: 1e-9,
            min_corner_deg: 1e-3,
            max_corner_deg: 179.9,
            eps_basis_area: 1e-6,
        }
    }
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    #[inline]
    pub fn is_orientation_preserving(&self) -> bool {
        self.m.determinant() > 0.0
    }

    /// Split `M = R S` with `R` a proper rotation, returning `(θ, S)`.
    ///
    /// `R`'s first column is the normalized first column of `M + sign(det M)·cof(M)`,
    /// where `cof(M) = [[m11, -m10], [-m01, m00]]`. For `det M ≥ 0` this is the
    /// polar rotation factor. When that column vanishes (e.g. `M ≈ 0`) `R = I`.
    pub fn rotation_split(&self) -> (f64, Matrix2<f64>) {
        let m = self.m;
        let sign = if m.determinant() < 0.0 { -1.0 } else { 1.0 };
        let col = Vector2::new(m[(0, 0)] + sign * m[(1, 1)], m[(1, 0)] - sign * m[(0, 1)]);
        let norm = col.norm();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return (0.0, m);
        }
        let (c, s) = (col.x / norm, col.y / norm);
        let theta = s.atan2(c);
        // R^{-1} = R^T for a rotation.
        let r_t = Matrix2::new(c, s, -s, c);
        (theta, r_t * m)
    }
}

/// Counter-clockwise rotation by `theta` radians.
#[inline]
pub fn rotation(theta: f64) -> Matrix2<f64> {
    let (s, c) = theta.sin_cos();
    Matrix2::new(c, -s, s, c)
}
