//! Criterion benchmarks for the correspondence DP and the full blend pipeline.
//! Focus sizes: m in {12, 24, 48, 96}, n = m / 2.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p shapeblend

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use shapeblend::api::{
    draw_polygon_radial, solve_correspondence, BlendCfg, CostMatrix, Offset, RadialCfg,
    ReplayToken, Shape, ShapeBlender, VertexCount, Weights,
};
use shapeblend::GeomCfg;

fn sample(n: usize, seed: u64) -> shapeblend::Polygon {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed, index: 0 })
}

fn cost_for(m: usize) -> CostMatrix {
    let cfg = GeomCfg::default();
    let a = Shape::new(sample(m, 41), &cfg);
    let b = Shape::new(sample(m / 2, 42), &cfg);
    CostMatrix::build(a.intr(), b.intr(), &Weights::default(), &cfg)
}

fn bench_correspondence(c: &mut Criterion) {
    let mut group = c.benchmark_group("correspondence");
    for &m in &[12usize, 24, 48, 96] {
        let cost = cost_for(m);
        group.bench_with_input(BenchmarkId::new("auto_offset", m), &cost, |b, cost| {
            b.iter(|| solve_correspondence(cost, Offset::Auto).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("manual_offset", m), &cost, |b, cost| {
            b.iter(|| solve_correspondence(cost, Offset::Manual(0)).unwrap())
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for &m in &[12usize, 48] {
        group.bench_with_input(BenchmarkId::new("solve_basis_frames", m), &m, |b, &m| {
            b.iter_batched(
                || ShapeBlender::from_polygons(sample(m, 7), sample(m / 2, 8), BlendCfg::default()),
                |mut blender| {
                    blender.compute_correspondence(Offset::Auto).unwrap();
                    // Near-collinear random draws may still be refused here.
                    if blender.find_optimal_basis().is_ok() {
                        for k in 0..=10 {
                            let _p = blender.interpolated_polygon(k as f64 / 10.0).unwrap();
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_correspondence, bench_pipeline);
criterion_main!(benches);
