//! Affine basis selection over an established correspondence.
//!
//! Every pair `(i_A, i_B)` is scored with `smooth_a` (shape, rotation and
//! area agreement). The best pairs form the three-point frame used by the
//! interpolator.
//!
//! Selection rule
//! - Rank surviving pairs (score above `GeomCfg::eps_score`) by descending
//!   score; ties keep increasing A order.
//! - Take the top pair, then the next pair with a different B index.
//! - Walk down the ranking for the first third pair (distinct B index) whose
//!   A- and B-triangles both clear the area floor. If none does, the first
//!   distinct candidate is used and the result is `IllConditioned`.
//! - Fewer than three usable pairs: evenly spaced default basis, `Fallback`.

use serde::Serialize;

use crate::config::Weights;
use crate::correspondence::Correspondence;
use crate::geom2::util::{heading_deg, triangle_area, wrap_deg};
use crate::geom2::{GeomCfg, Shape};

/// Three corresponding index pairs: `a[k]` in A pairs with `b[k]` in B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AffineBasis {
    pub a: [usize; 3],
    pub b: [usize; 3],
}

impl AffineBasis {
    /// `{0, len/3, 2·len/3}` on each polygon.
    pub fn evenly_spaced(m: usize, n: usize) -> Self {
        Self {
            a: [0, m / 3, 2 * m / 3],
            b: [0, n / 3, 2 * n / 3],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FallbackReason {
    TooFewPairs { pairs: usize },
    TooFewScored { survivors: usize },
}

/// How much to trust a selected basis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum BasisQuality {
    Good,
    /// Chosen by rank, but no candidate gave a well-conditioned frame on both sides.
    IllConditioned { area_a: f64, area_b: f64 },
    Fallback(FallbackReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BasisSelection {
    pub basis: AffineBasis,
    /// `smooth_a` of each chosen pair (zeros for a fallback).
    pub scores: [f64; 3],
    pub quality: BasisQuality,
}

impl BasisSelection {
    #[inline]
    pub fn is_degraded(&self) -> bool {
        !matches!(self.quality, BasisQuality::Good)
    }

    /// Product of the three pair scores.
    #[inline]
    pub fn joint_score(&self) -> f64 {
        self.scores.iter().product()
    }
}

/// Basis-candidate quality of the pair `(i_a, i_b)`.
///
/// Returns 0 when either corner angle is outside
/// `(cfg.min_corner_deg, cfg.max_corner_deg)`.
pub fn smooth_a(a: &Shape, i_a: usize, b: &Shape, i_b: usize, w: &Weights, cfg: &GeomCfg) -> f64 {
    let ca = a.intr().corner(i_a);
    let cb = b.intr().corner(i_b);
    let usable = |deg: f64| deg > cfg.min_corner_deg && deg < cfg.max_corner_deg;
    if !usable(ca.angle_curr) || !usable(cb.angle_curr) {
        return 0.0;
    }

    let abs_diff = |x: [f64; 3], y: [f64; 3]| -> f64 { x.iter().zip(&y).map(|(p, q)| (p - q).abs()).sum() };

    let (ea, eb) = (ca.edges(), cb.edges());
    let edge_sum: f64 = ea.iter().chain(&eb).sum();
    let sim_edges = if edge_sum < cfg.eps_score {
        1.0
    } else {
        1.0 - abs_diff(ea, eb) / edge_sum
    };
    // Each triple of a non-degenerate corner triangle sums to 180°.
    let sim_angles = (1.0 - abs_diff(ca.angles(), cb.angles()) / 180.0).max(0.0);
    let shape = 0.5 * sim_angles + 0.5 * sim_edges;

    let (pa, pb) = (a.poly(), b.poly());
    let dir_a = pa.points()[pa.next_idx(i_a)] - pa.points()[i_a];
    let dir_b = pb.points()[pb.next_idx(i_b)] - pb.points()[i_b];
    let turn = wrap_deg(heading_deg(dir_b) - heading_deg(dir_a)).abs();
    let rotation = 1.0 - turn / 180.0;

    let total = a.intr().total_area + b.intr().total_area;
    let area = if total < cfg.eps_area {
        0.0
    } else {
        (ca.area + cb.area) / total
    };

    w.ws * shape + w.wr * rotation + w.wa() * area
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Scored {
    score: f64,
    a: usize,
    b: usize,
}

/// Pick the interpolation basis for `corr` between `a` and `b`.
pub fn select_basis(
    corr: &Correspondence,
    a: &Shape,
    b: &Shape,
    w: &Weights,
    cfg: &GeomCfg,
) -> BasisSelection {
    if corr.len() < 3 {
        return fallback(a, b, FallbackReason::TooFewPairs { pairs: corr.len() });
    }
    let mut ranked: Vec<Scored> = corr
        .pairs()
        .map(|(i_a, i_b)| Scored {
            score: smooth_a(a, i_a, b, i_b, w, cfg),
            a: i_a,
            b: i_b,
        })
        .filter(|s| s.score > cfg.eps_score)
        .collect();
    if ranked.len() < 3 {
        return fallback(
            a,
            b,
            FallbackReason::TooFewScored {
                survivors: ranked.len(),
            },
        );
    }
    ranked.sort_by(|x, y| y.score.total_cmp(&x.score));

    match pick(&ranked, a, b, cfg) {
        Some((chosen, quality)) => {
            let sel = BasisSelection {
                basis: AffineBasis {
                    a: chosen.map(|s| s.a),
                    b: chosen.map(|s| s.b),
                },
                scores: chosen.map(|s| s.score),
                quality,
            };
            if let BasisQuality::IllConditioned { area_a, area_b } = quality {
                tracing::warn!(area_a, area_b, basis = ?sel.basis, "basis triangle is ill-conditioned");
            } else {
                tracing::info!(basis = ?sel.basis, joint_score = sel.joint_score(), "basis selected");
            }
            sel
        }
        None => fallback(
            a,
            b,
            FallbackReason::TooFewScored {
                survivors: distinct_b(&ranked),
            },
        ),
    }
}

fn distinct_b(ranked: &[Scored]) -> usize {
    let mut bs: Vec<usize> = ranked.iter().map(|s| s.b).collect();
    bs.sort_unstable();
    bs.dedup();
    bs.len()
}

/// Greedy choice over a descending ranking; `None` if fewer than three distinct B indices.
fn pick(ranked: &[Scored], a: &Shape, b: &Shape, cfg: &GeomCfg) -> Option<([Scored; 3], BasisQuality)> {
    let first = ranked[0];
    let second_pos = ranked.iter().position(|s| s.b != first.b)?;
    let second = ranked[second_pos];
    let thirds = ranked[second_pos + 1..]
        .iter()
        .filter(|s| s.b != first.b && s.b != second.b);

    let floor_a = (cfg.eps_basis_area * a.poly().area()).max(cfg.eps_area);
    let floor_b = (cfg.eps_basis_area * b.poly().area()).max(cfg.eps_area);
    let areas = |third: &Scored| {
        let pa = a.poly().points();
        let pb = b.poly().points();
        (
            triangle_area(pa[first.a], pa[second.a], pa[third.a]),
            triangle_area(pb[first.b], pb[second.b], pb[third.b]),
        )
    };

    let mut fallback_third: Option<(Scored, f64, f64)> = None;
    for third in thirds {
        let (area_a, area_b) = areas(third);
        if area_a >= floor_a && area_b >= floor_b {
            return Some(([first, second, *third], BasisQuality::Good));
        }
        if fallback_third.is_none() {
            fallback_third = Some((*third, area_a, area_b));
        }
    }
    let (third, area_a, area_b) = fallback_third?;
    Some((
        [first, second, third],
        BasisQuality::IllConditioned { area_a, area_b },
    ))
}

fn fallback(a: &Shape, b: &Shape, reason: FallbackReason) -> BasisSelection {
    let basis = AffineBasis::evenly_spaced(a.len(), b.len());
    tracing::warn!(?reason, ?basis, "falling back to evenly spaced basis");
    BasisSelection {
        basis,
        scores: [0.0; 3],
        quality: BasisQuality::Fallback(reason),
    }
}
