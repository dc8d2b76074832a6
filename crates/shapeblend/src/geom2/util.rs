use nalgebra::Vector2;

/// z-component of `(b - a) × (c - a)`; twice the signed triangle area.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
pub fn triangle_area(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    0.5 * cross(a, b, c).abs()
}

/// Shoelace sum `½ Σ (x_i y_{i+1} − x_{i+1} y_i)`; positive for CCW.
pub fn signed_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    let mut acc = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

/// Angle (degrees) between sides `a` and `b` of a triangle whose third side is `opp`.
///
/// The cosine is clamped to [-1, 1] before `acos` to absorb rounding overshoot.
#[inline]
pub fn law_of_cosines_deg(a: f64, b: f64, opp: f64, eps: f64) -> f64 {
    if a < eps || b < eps {
        return 0.0;
    }
    let cos = ((a * a + b * b - opp * opp) / (2.0 * a * b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Wrap an angle in degrees into (-180, 180].
#[inline]
pub fn wrap_deg(a: f64) -> f64 {
    let r = a.to_radians();
    let w = r.sin().atan2(r.cos()).to_degrees();
    if w <= -180.0 {
        w + 360.0
    } else {
        w
    }
}

/// Direction of `v` in degrees, in (-180, 180].
#[inline]
pub fn heading_deg(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x).to_degrees()
}
