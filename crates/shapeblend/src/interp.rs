//! Affine-frame interpolation between two corresponded polygons.
//!
//! Model
//! - The basis triangles `(A1,B1,C1) ⊂ A` and `(A2,B2,C2) ⊂ B` fix a unique
//!   affine map `x ↦ M x + T` taking one onto the other (6×6 linear system).
//! - `M = R(θ) S` is split into a rotation and a residual (scale/shear), see
//!   `Aff2::rotation_split`. At time `t`:
//!   `M_t = (1−t) I + R(tθ) · (t S)`, `T_t = t T`.
//! - Each vertex is expressed in the local frame of its basis triangle,
//!   `P = B + u (A − B) + v (C − B)`, on both sides; `(u, v)` is interpolated
//!   linearly and mapped back through the time-`t` basis triangle.
//!
//! The local coordinates do not depend on `t`, so `MorphPlan` computes them
//! once and every `at(t)` call is a cheap affine evaluation. `t` outside
//! [0, 1] extrapolates.

use nalgebra::{Matrix2, Matrix6, Vector2, Vector6};

use crate::basis::AffineBasis;
use crate::correspondence::Correspondence;
use crate::error::{BlendError, Stage};
use crate::geom2::util::triangle_area;
use crate::geom2::{rotation, Aff2, GeomCfg, Polygon};

/// Unique affine map sending `src[k]` to `dst[k]`; `None` if `src` is collinear.
pub fn solve_affine(src: [Vector2<f64>; 3], dst: [Vector2<f64>; 3]) -> Option<Aff2> {
    if triangle_area(src[0], src[1], src[2]) == 0.0 {
        return None;
    }
    let mut rows = [0.0; 36];
    let mut rhs = Vector6::zeros();
    for (k, (p, q)) in src.iter().zip(&dst).enumerate() {
        let r = 2 * k;
        rows[r * 6..r * 6 + 6].copy_from_slice(&[p.x, p.y, 0.0, 0.0, 1.0, 0.0]);
        rows[(r + 1) * 6..(r + 1) * 6 + 6].copy_from_slice(&[0.0, 0.0, p.x, p.y, 0.0, 1.0]);
        rhs[r] = q.x;
        rhs[r + 1] = q.y;
    }
    let x = Matrix6::from_row_slice(&rows).try_inverse()? * rhs;
    let f = Aff2 {
        m: Matrix2::new(x[0], x[1], x[2], x[3]),
        t: Vector2::new(x[4], x[5]),
    };
    f.m.iter()
        .chain(f.t.iter())
        .all(|v| v.is_finite())
        .then_some(f)
}

/// `(u, v)` with `p = b + u (a − b) + v (c − b)`; NaN when the frame is singular.
pub fn local_coords(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Vector2<f64> {
    Matrix2::from_columns(&[a - b, c - b])
        .try_inverse()
        .map(|inv| inv * (p - b))
        .unwrap_or_else(|| Vector2::repeat(f64::NAN))
}

/// Inverse of `local_coords`.
#[inline]
pub fn world_coords(
    uv: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
) -> Vector2<f64> {
    b + (a - b) * uv.x + (c - b) * uv.y
}

/// Everything needed to evaluate the morph at any `t`.
#[derive(Clone, Debug)]
pub struct MorphPlan {
    frame_a: [Vector2<f64>; 3],
    map: Aff2,
    theta: f64,
    residual: Matrix2<f64>,
    /// Per A vertex: local coordinates in the A frame and of its partner in the B frame.
    local: Vec<(Vector2<f64>, Vector2<f64>)>,
}

impl MorphPlan {
    pub fn new(
        a: &Polygon,
        b: &Polygon,
        corr: &Correspondence,
        basis: &AffineBasis,
        cfg: &GeomCfg,
    ) -> Result<Self, BlendError> {
        if corr.len() != a.len() || corr.map().iter().any(|&j| j >= b.len()) {
            return Err(BlendError::NotReady(Stage::Correspondence));
        }
        let (pa, pb) = (a.points(), b.points());
        let frame_a = basis.a.map(|i| pa[i]);
        let frame_b = basis.b.map(|i| pb[i]);

        let area_a = triangle_area(frame_a[0], frame_a[1], frame_a[2]);
        let area_b = triangle_area(frame_b[0], frame_b[1], frame_b[2]);
        let floor_a = (cfg.eps_basis_area * a.area()).max(cfg.eps_area);
        let floor_b = (cfg.eps_basis_area * b.area()).max(cfg.eps_area);
        if area_a < floor_a || area_b < floor_b {
            return Err(BlendError::DegenerateBasis { area_a, area_b });
        }
        let map =
            solve_affine(frame_a, frame_b).ok_or(BlendError::DegenerateBasis { area_a, area_b })?;
        let (theta, residual) = map.rotation_split();

        let [a1, b1, c1] = frame_a;
        let [a2, b2, c2] = frame_b;
        let local = corr
            .pairs()
            .map(|(i, j)| {
                (
                    local_coords(pa[i], a1, b1, c1),
                    local_coords(pb[j], a2, b2, c2),
                )
            })
            .collect();
        tracing::debug!(
            theta_deg = theta.to_degrees(),
            orientation_preserving = map.is_orientation_preserving(),
            "morph plan prepared"
        );
        Ok(Self {
            frame_a,
            map,
            theta,
            residual,
            local,
        })
    }

    /// The full basis-to-basis map (reached at `t = 1`).
    #[inline]
    pub fn affine(&self) -> &Aff2 {
        &self.map
    }

    /// Rotation angle θ of the split `M = R(θ) S`, in radians.
    #[inline]
    pub fn rotation_angle(&self) -> f64 {
        self.theta
    }

    #[inline]
    pub fn residual(&self) -> &Matrix2<f64> {
        &self.residual
    }

    /// Interpolated basis map at `t`.
    pub fn affine_at(&self, t: f64) -> Aff2 {
        Aff2 {
            m: Matrix2::identity() * (1.0 - t) + rotation(t * self.theta) * (self.residual * t),
            t: self.map.t * t,
        }
    }

    /// Interpolated polygon at `t`; same vertex count and order as A.
    pub fn at(&self, t: f64) -> Polygon {
        let f = self.affine_at(t);
        let [at, bt, ct] = self.frame_a.map(|p| f.apply(p));
        let points = self
            .local
            .iter()
            .map(|(uv1, uv2)| world_coords(uv1 * (1.0 - t) + uv2 * t, at, bt, ct))
            .collect();
        Polygon::from_raw(points)
    }
}
