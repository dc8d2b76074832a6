//! 2D polygon geometry for shape blending.
//!
//! Purpose
//! - Hold the ordered vertex list of a simple polygon (`Polygon`) with its
//!   winding sign and shoelace area.
//! - Derive the per-corner intrinsics (`Intrinsics`) consumed by the
//!   correspondence cost and the basis score.
//! - Keep tolerances explicit in one place (`GeomCfg`).
//!
//! Code cross-refs: `correspondence::CostMatrix`, `basis::smooth_a`, `interp::MorphPlan`

pub mod intrinsics;
pub mod polygon;
pub mod rand;
mod types;
pub(crate) mod util;

pub use intrinsics::{precompute, Corner, Intrinsics, Shape};
pub use polygon::Polygon;
pub use types::{rotation, Affine2 as Aff2, GeomCfg};
