//! Per-corner intrinsic measurements of a polygon.
//!
//! For vertex `i` the corner triangle is `(prev, curr, next)` with sides
//! `e1 = |curr − prev|`, `e2 = |next − curr|`, `e0 = |next − prev|`. Its three
//! interior angles come from the law of cosines; a corner with an incident
//! edge shorter than `GeomCfg::eps_edge` has all angles 0.
//!
//! Intrinsics are derived data: any vertex change requires a full `precompute`.

use super::polygon::Polygon;
use super::types::GeomCfg;
use super::util::{law_of_cosines_deg, triangle_area};

/// Measurements of a single corner triangle. Angles in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Corner {
    pub e0: f64,
    pub e1: f64,
    pub e2: f64,
    pub angle_prev: f64,
    pub angle_curr: f64,
    pub angle_next: f64,
    pub area: f64,
}

impl Corner {
    #[inline]
    pub fn edges(&self) -> [f64; 3] {
        [self.e0, self.e1, self.e2]
    }

    #[inline]
    pub fn angles(&self) -> [f64; 3] {
        [self.angle_curr, self.angle_prev, self.angle_next]
    }
}

/// All corners of one polygon plus its global area terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Intrinsics {
    pub corners: Vec<Corner>,
    pub signed_area: f64,
    pub total_area: f64,
    pub winding: i8,
}

impl Intrinsics {
    #[inline]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    #[inline]
    pub fn corner(&self, i: usize) -> &Corner {
        &self.corners[i]
    }
}

/// Compute all corner intrinsics of `poly` from scratch.
pub fn precompute(poly: &Polygon, cfg: &GeomCfg) -> Intrinsics {
    let pts = poly.points();
    let corners = (0..pts.len())
        .map(|i| {
            let prev = pts[poly.prev_idx(i)];
            let curr = pts[i];
            let next = pts[poly.next_idx(i)];
            let e1 = (curr - prev).norm();
            let e2 = (next - curr).norm();
            let e0 = (next - prev).norm();
            let area = triangle_area(prev, curr, next);
            if e1 < cfg.eps_edge || e2 < cfg.eps_edge {
                return Corner {
                    e0,
                    e1,
                    e2,
                    area,
                    ..Corner::default()
                };
            }
            Corner {
                e0,
                e1,
                e2,
                angle_prev: law_of_cosines_deg(e1, e0, e2, cfg.eps_edge),
                angle_curr: law_of_cosines_deg(e1, e2, e0, cfg.eps_edge),
                angle_next: law_of_cosines_deg(e2, e0, e1, cfg.eps_edge),
                area,
            }
        })
        .collect();
    Intrinsics {
        corners,
        signed_area: poly.signed_area(),
        total_area: poly.area(),
        winding: poly.winding(),
    }
}

/// A polygon bundled with the intrinsics derived from it.
///
/// The only way to change the vertices is to build a new `Shape`, so the two
/// can never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    poly: Polygon,
    intr: Intrinsics,
}

impl Shape {
    pub fn new(poly: Polygon, cfg: &GeomCfg) -> Self {
        let intr = precompute(&poly, cfg);
        Self { poly, intr }
    }

    #[inline]
    pub fn poly(&self) -> &Polygon {
        &self.poly
    }

    #[inline]
    pub fn intr(&self) -> &Intrinsics {
        &self.intr
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.poly.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poly.is_empty()
    }

    /// Reverse the traversal and re-derive every corner.
    pub fn reversed(&self, cfg: &GeomCfg) -> Self {
        Self::new(self.poly.reversed(), cfg)
    }
}
