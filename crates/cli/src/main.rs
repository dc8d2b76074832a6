use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use serde_json::json;
use shapeblend::api::{
    draw_polygon_radial, recenter_rescale, regular_polygon, save_points, BasisQuality, BlendCfg,
    BlendError, Offset, RadialCfg, ReplayToken, ShapeBlender, VertexCount, Weights,
};
use shapeblend::Vec2;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Shape-aware polygon blending: solve, morph and sample")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve correspondence and basis; print a JSON report
    Solve {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Export interpolated frames as CSV or Parquet (by extension)
    Morph {
        #[command(flatten)]
        pair: PairArgs,
        /// Number of frames, t evenly spaced over [0, 1]
        #[arg(long, default_value_t = 11)]
        frames: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Draw a random star-shaped polygon and write it as a JSON point list
    Sample {
        #[command(flatten)]
        args: SampleArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct PairArgs {
    /// Polygon A (the one with at least as many vertices)
    #[arg(long)]
    a: PathBuf,
    #[arg(long)]
    b: PathBuf,
    /// Fixed cyclic start offset of A; searched over all offsets if omitted
    #[arg(long)]
    offset: Option<usize>,
    #[command(flatten)]
    weights: WeightArgs,
}

#[derive(Args, Clone, Copy, Debug)]
struct SampleArgs {
    #[arg(long, default_value_t = 12)]
    vertices: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    /// Distance of the farthest vertex from the centroid
    #[arg(long, default_value_t = 1.0)]
    radius: f64,
    /// Regular polygon centred at the origin instead of a random draw
    #[arg(long)]
    regular: bool,
}

#[derive(Args, Clone, Copy, Debug)]
struct WeightArgs {
    /// Edge weight of the corner similarity (angle weight is 1 - w1)
    #[arg(long, default_value_t = 0.5)]
    w1: f64,
    /// Shape weight of the basis score
    #[arg(long, default_value_t = 0.5)]
    ws: f64,
    /// Rotation weight of the basis score (area weight is 1 - ws - wr)
    #[arg(long, default_value_t = 0.3)]
    wr: f64,
}

impl WeightArgs {
    fn to_cfg(self) -> BlendCfg {
        BlendCfg {
            weights: Weights {
                w1: self.w1,
                ws: self.ws,
                wr: self.wr,
            },
            ..BlendCfg::default()
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { pair } => solve(&pair),
        Action::Morph { pair, frames, out } => morph(&pair, frames, &out),
        Action::Sample { args, out } => sample(args, &out),
        Action::Report => report(),
    }
}

/// Load, solve and select the basis. A refused basis is logged, not fatal.
fn prepare(pair: &PairArgs) -> Result<ShapeBlender> {
    let mut blender = ShapeBlender::new(pair.weights.to_cfg());
    blender
        .load_polygons(&pair.a, &pair.b)
        .with_context(|| format!("loading {} and {}", pair.a.display(), pair.b.display()))?;
    let offset = pair.offset.map(Offset::Manual).unwrap_or(Offset::Auto);
    blender
        .compute_correspondence(offset)
        .context("computing correspondence")?;
    match blender.find_optimal_basis() {
        Ok(_) => {}
        Err(err @ BlendError::DegenerateBasis { .. }) => tracing::warn!(%err, "no morph plan"),
        Err(err) => return Err(err).context("selecting basis"),
    }
    Ok(blender)
}

fn solve(pair: &PairArgs) -> Result<()> {
    let blender = prepare(pair)?;
    println!("{}", serde_json::to_string_pretty(&solve_report(&blender))?);
    Ok(())
}

fn solve_report(blender: &ShapeBlender) -> serde_json::Value {
    json!({
        "m": blender.poly_a().map(|p| p.len()),
        "n": blender.poly_b().map(|p| p.len()),
        "correspondence": blender.correspondence(),
        "basis": blender.basis(),
        "degraded": blender.basis().map(|b| b.is_degraded()),
        "plan_ready": blender.plan().is_some(),
        "weights": blender.weights(),
    })
}

fn morph(pair: &PairArgs, frames: usize, out: &Path) -> Result<()> {
    if frames < 2 {
        bail!("--frames must be at least 2, got {frames}");
    }
    let blender = prepare(pair)?;
    if let Some(BasisQuality::IllConditioned { area_a, area_b }) =
        blender.basis().map(|b| b.quality)
    {
        tracing::warn!(area_a, area_b, "morphing with an ill-conditioned basis");
    }
    let mut df = frame_table(&blender, frames)?;
    create_parent(out)?;
    let mut file = fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("parquet") => {
            ParquetWriter::new(&mut file).finish(&mut df)?;
        }
        _ => CsvWriter::new(&mut file).include_header(true).finish(&mut df)?,
    }
    tracing::info!(rows = df.height(), out = %out.display(), "frames written");

    let payload = provenance::Payload {
        params: json!({
            "frames": frames,
            "offset": pair.offset,
            "cfg": blender.cfg(),
            "best_offset": blender.best_offset(),
            "basis": blender.basis(),
        }),
        inputs: vec![pair.a.clone(), pair.b.clone()],
    };
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

/// Long table `(frame, t, vertex, x, y)`; non-finite vertices are skipped.
fn frame_table(blender: &ShapeBlender, frames: usize) -> Result<DataFrame> {
    let (mut frame, mut ts, mut vertex, mut xs, mut ys) =
        (Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
    let mut skipped = 0usize;
    for k in 0..frames {
        let t = k as f64 / (frames - 1) as f64;
        let poly = blender.interpolated_polygon(t)?;
        for (i, p) in poly.points().iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                skipped += 1;
                continue;
            }
            frame.push(k as u32);
            ts.push(t);
            vertex.push(i as u32);
            xs.push(p.x);
            ys.push(p.y);
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "non-finite vertices dropped from output");
    }
    Ok(polars::df!(
        "frame" => frame,
        "t" => ts,
        "vertex" => vertex,
        "x" => xs,
        "y" => ys
    )?)
}

fn sample(args: SampleArgs, out: &Path) -> Result<()> {
    if !(args.radius > 0.0) {
        bail!("--radius must be positive, got {}", args.radius);
    }
    let poly = if args.regular {
        regular_polygon(args.vertices, args.radius, Vec2::zeros(), 0.0)
    } else {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Fixed(args.vertices),
            ..RadialCfg::default()
        };
        let tok = ReplayToken {
            seed: args.seed,
            index: args.index,
        };
        let drawn = draw_polygon_radial(cfg, tok);
        recenter_rescale(&drawn, args.radius).unwrap_or(drawn)
    };
    create_parent(out)?;
    save_points(out, &poly)?;
    tracing::info!(vertices = poly.len(), ?args, out = %out.display(), "sample written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": shapeblend::VERSION,
        "defaults": BlendCfg::default(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn create_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeblend::Polygon;
    use tempfile::tempdir;

    fn write_pair(dir: &Path) -> PairArgs {
        let a = Polygon::from_xy(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 2.0], [0.0, 1.0]])
            .unwrap();
        let b = Polygon::from_xy(&[[4.0, 0.0], [6.0, 0.0], [5.0, 2.0]]).unwrap();
        let (pa, pb) = (dir.join("a.json"), dir.join("b.json"));
        save_points(&pa, &a).unwrap();
        save_points(&pb, &b).unwrap();
        PairArgs {
            a: pa,
            b: pb,
            offset: None,
            weights: WeightArgs {
                w1: 0.5,
                ws: 0.5,
                wr: 0.3,
            },
        }
    }

    #[test]
    fn solve_report_lists_every_a_vertex() {
        let dir = tempdir().unwrap();
        let blender = prepare(&write_pair(dir.path())).unwrap();
        let report = solve_report(&blender);
        assert_eq!(report["m"], 5);
        assert_eq!(report["correspondence"]["map"].as_array().unwrap().len(), 5);
        assert_eq!(report["plan_ready"], true);
    }

    #[test]
    fn morph_writes_csv_and_sidecar() {
        let dir = tempdir().unwrap();
        let pair = write_pair(dir.path());
        let out = dir.path().join("out").join("frames.csv");
        morph(&pair, 4, &out).unwrap();

        let df = LazyCsvReader::new(&out)
            .with_infer_schema_length(Some(100))
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(df.shape(), (4 * 5, 5));
        assert!(dir.path().join("out").join("frames.provenance.json").exists());
    }

    #[test]
    fn morph_writes_parquet_by_extension() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("frames.parquet");
        morph(&write_pair(dir.path()), 3, &out).unwrap();
        let df = ParquetReader::new(fs::File::open(&out).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.height(), 3 * 5);
    }

    #[test]
    fn morph_needs_two_frames() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("frames.csv");
        assert!(morph(&write_pair(dir.path()), 1, &out).is_err());
        assert!(!out.exists());
    }

    fn sample_args(regular: bool) -> SampleArgs {
        SampleArgs {
            vertices: 9,
            seed: 3,
            index: 0,
            radius: 2.0,
            regular,
        }
    }

    #[test]
    fn sample_is_reproducible_and_rescaled() {
        let dir = tempdir().unwrap();
        let (p, q) = (dir.path().join("p.json"), dir.path().join("q.json"));
        sample(sample_args(false), &p).unwrap();
        sample(sample_args(false), &q).unwrap();
        assert_eq!(fs::read(&p).unwrap(), fs::read(&q).unwrap());
        let poly = shapeblend::api::load_points(&p).unwrap();
        assert_eq!(poly.len(), 9);
        assert_eq!(poly.winding(), 1);
        let r = poly.points().iter().map(|v| v.norm()).fold(0.0, f64::max);
        assert!((r - 2.0).abs() < 1e-9);
    }

    #[test]
    fn regular_sample_sits_on_the_circle() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("hex.json");
        sample(sample_args(true), &p).unwrap();
        let poly = shapeblend::api::load_points(&p).unwrap();
        assert!(poly.points().iter().all(|v| (v.norm() - 2.0).abs() < 1e-9));
    }
}
