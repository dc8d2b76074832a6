//! Morph between two random star-shaped polygons and print a few frames.
//!
//! Usage:
//!   cargo run -p shapeblend --example random_morph -- [seed]
//!
//! Prints the chosen offset, the basis quality and the vertices at
//! t = 0, 0.5, 1.

use shapeblend::prelude::*;

fn main() {
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025);
    let draw = |n: usize, index: u64| {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(n),
            ..RadialCfg::default()
        };
        draw_polygon_radial(cfg, ReplayToken { seed, index })
    };

    let mut blender = ShapeBlender::from_polygons(draw(10, 0), draw(6, 1), BlendCfg::default());
    let corr = match blender.compute_correspondence(Offset::Auto) {
        Ok(c) => c.clone(),
        Err(e) => {
            eprintln!("correspondence failed: {e}");
            return;
        }
    };
    println!(
        "offset={} total_cost={:.4} map={:?}",
        corr.offset(),
        corr.total_cost(),
        corr.map()
    );
    match blender.find_optimal_basis() {
        Ok(sel) => println!("basis={:?} quality={:?}", sel.basis, sel.quality),
        Err(e) => {
            eprintln!("basis refused: {e}");
            return;
        }
    }
    for t in [0.0, 0.5, 1.0] {
        if let Ok(p) = blender.interpolated_polygon(t) {
            let pts: Vec<String> = p
                .points()
                .iter()
                .map(|v| format!("({:.3}, {:.3})", v.x, v.y))
                .collect();
            println!("t={t}: {}", pts.join(" "));
        }
    }
}
