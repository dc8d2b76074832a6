use super::*;
use crate::config::Weights;
use crate::error::BlendError;
use crate::geom2::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use crate::geom2::{precompute, GeomCfg, Polygon};
use proptest::prelude::*;

fn cost_of(a: &Polygon, b: &Polygon) -> CostMatrix {
    let cfg = GeomCfg::default();
    CostMatrix::build(
        &precompute(a, &cfg),
        &precompute(b, &cfg),
        &Weights::default(),
        &cfg,
    )
}

/// Right triangle and the same triangle with its edge midpoints inserted.
fn triangle_and_subdivided() -> (Polygon, Polygon) {
    let a = Polygon::from_xy(&[
        [0.0, 0.0],
        [1.0, 0.0],
        [2.0, 0.0],
        [1.0, 1.0],
        [0.0, 2.0],
        [0.0, 1.0],
    ])
    .unwrap();
    let b = Polygon::from_xy(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]]).unwrap();
    (a, b)
}

#[test]
fn sim_t_is_one_for_identical_corners() {
    let sq = Polygon::from_xy(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
    let intr = precompute(&sq, &GeomCfg::default());
    let s = sim_t(
        intr.corner(0),
        intr.corner(2),
        &Weights::default(),
        &GeomCfg::default(),
    );
    assert!((s - 1.0).abs() < 1e-12);
}

#[test]
fn congruent_triangles_align_at_zero_cost() {
    let a = Polygon::from_xy(&[[0.0, 0.0], [2.0, 0.0], [1.0, 2.0]]).unwrap();
    let b = Polygon::from_xy(&[[5.0, 0.0], [7.0, 0.0], [6.0, 2.0]]).unwrap();
    let c = solve(&cost_of(&a, &b), Offset::Auto).unwrap();
    assert_eq!(c.map(), &[0, 1, 2]);
    assert_eq!(c.offset(), 0);
    assert!(c.total_cost().abs() < 1e-12);
}

#[test]
fn subdivided_triangle_maps_corners_to_corners() {
    let (a, b) = triangle_and_subdivided();
    let cost = cost_of(&a, &b);
    let c = solve(&cost, Offset::Auto).unwrap();
    assert_eq!(c.offset(), 5);
    assert_eq!(c.map(), &[0, 0, 1, 1, 2, 0]);
    assert!((c.total_cost() - 0.523286437626905).abs() < 1e-9);
    // Original corners (even indices) land on their own B corner.
    assert_eq!(c.target(0), 0);
    assert_eq!(c.target(2), 1);
    assert_eq!(c.target(4), 2);
    assert!(c.is_monotone());
}

#[test]
fn ties_prefer_southeast_when_backtracking() {
    let cost = CostMatrix::from_row_major(4, 2, vec![0.0; 8]).unwrap();
    let c = solve(&cost, Offset::Manual(0)).unwrap();
    assert_eq!(c.map(), &[0, 0, 0, 1]);
}

#[test]
fn explicit_grid_follows_cheapest_staircase() {
    // Rows: A corners, cols: B corners. Cheapest path is 0→0, 1→1, 2→1, 3→2.
    #[rustfmt::skip]
    let data = vec![
        0.0, 9.0, 9.0,
        9.0, 0.0, 9.0,
        9.0, 0.0, 9.0,
        9.0, 9.0, 0.0,
    ];
    let cost = CostMatrix::from_row_major(4, 3, data).unwrap();
    let c = solve(&cost, Offset::Manual(0)).unwrap();
    assert_eq!(c.map(), &[0, 1, 1, 2]);
    assert_eq!(c.total_cost(), 0.0);
}

#[test]
fn manual_offset_is_used_verbatim() {
    let (a, b) = triangle_and_subdivided();
    let cost = cost_of(&a, &b);
    let c = solve(&cost, Offset::Manual(2)).unwrap();
    assert_eq!(c.offset(), 2);
    assert_eq!(c.target(2), 0);
    assert_eq!(c.target(1), 2);
    assert!((c.path_cost(&cost) - c.total_cost()).abs() < 1e-12);
}

#[test]
fn rejects_fewer_a_vertices_and_bad_offsets() {
    let (a, b) = triangle_and_subdivided();
    let err = solve(&cost_of(&b, &a), Offset::Auto).unwrap_err();
    assert!(matches!(err, BlendError::VertexCountOrder { m: 3, n: 6 }));
    let err = solve(&cost_of(&a, &b), Offset::Manual(6)).unwrap_err();
    assert!(matches!(err, BlendError::InvalidOffset { offset: 6, m: 6 }));
}

#[test]
fn offset_search_can_be_interrupted() {
    let (a, b) = triangle_and_subdivided();
    let mut seen = Vec::new();
    let err = solve_with(&cost_of(&a, &b), Offset::Auto, |k| {
        seen.push(k);
        k < 2
    })
    .unwrap_err();
    assert!(matches!(err, BlendError::Interrupted { offset: 2 }));
    assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn simultaneous_reversal_mirrors_the_alignment() {
    let (a, b) = triangle_and_subdivided();
    let fwd = solve(&cost_of(&a, &b), Offset::Auto).unwrap();
    let rev = solve(&cost_of(&a.reversed(), &b.reversed()), Offset::Auto).unwrap();
    assert!((fwd.total_cost() - rev.total_cost()).abs() < 1e-12);
    let (m, n) = (a.len(), b.len());
    // The corners are uniquely determined; midpoints may tie.
    for i in [0, 2, 4] {
        assert_eq!(rev.target(m - 1 - i), n - 1 - fwd.target(i));
    }
}

fn radial(n: usize, seed: u64) -> Polygon {
    draw_polygon_radial(
        RadialCfg {
            vertex_count: VertexCount::Fixed(n),
            ..RadialCfg::default()
        },
        ReplayToken { seed, index: 1 },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn alignment_is_total_monotone_and_costs_add_up(
        n in 3usize..12,
        extra in 0usize..10,
        seed in any::<u64>(),
    ) {
        let a = radial(n + extra, seed);
        let b = radial(n, seed.wrapping_add(1));
        let cost = cost_of(&a, &b);
        let c = solve(&cost, Offset::Auto).unwrap();
        prop_assert_eq!(c.len(), a.len());
        prop_assert!(c.map().iter().all(|&j| j < b.len()));
        prop_assert!(c.is_monotone());
        let path: Vec<_> = c.path().collect();
        prop_assert_eq!(path[0].1, 0);
        prop_assert_eq!(path[path.len() - 1].1, n - 1);
        prop_assert!((c.path_cost(&cost) - c.total_cost()).abs() < 1e-9);
        for k in 0..a.len() {
            let manual = solve(&cost, Offset::Manual(k)).unwrap();
            prop_assert!(c.total_cost() <= manual.total_cost() + 1e-12);
        }
    }

    #[test]
    fn cost_is_symmetric_under_simultaneous_reversal(
        n in 3usize..10,
        extra in 0usize..8,
        seed in any::<u64>(),
    ) {
        let a = radial(n + extra, seed);
        let b = radial(n, seed ^ 0x5555);
        let fwd = cost_of(&a, &b);
        let rev = cost_of(&a.reversed(), &b.reversed());
        let (m, n) = (fwd.rows(), fwd.cols());
        for i in 0..m {
            for j in 0..n {
                prop_assert!((rev.get(i, j) - fwd.get(m - 1 - i, n - 1 - j)).abs() < 1e-12);
            }
        }
        let best_fwd = solve(&fwd, Offset::Auto).unwrap().total_cost();
        let best_rev = solve(&rev, Offset::Auto).unwrap().total_cost();
        prop_assert!((best_fwd - best_rev).abs() < 1e-9);
    }
}
