//! Curated API for callers (UNSTABLE).
//!
//! Prefer these re-exports over deep module paths; internals may be
//! reorganized without notice.

// Geometry
pub use crate::geom2::rand::{
    draw_polygon_radial, recenter_rescale, regular_polygon, RadialCfg, ReplayToken, VertexCount,
};
pub use crate::geom2::{precompute, rotation, Aff2, Corner, GeomCfg, Intrinsics, Polygon, Shape};
// Correspondence
pub use crate::correspondence::{
    sim_t, solve as solve_correspondence, solve_with as solve_correspondence_with,
    Correspondence, CostMatrix, Offset,
};
// Basis and interpolation
pub use crate::basis::{
    select_basis, smooth_a, AffineBasis, BasisQuality, BasisSelection, FallbackReason,
};
pub use crate::interp::{local_coords, solve_affine, world_coords, MorphPlan};
// Session and I/O
pub use crate::blender::ShapeBlender;
pub use crate::config::{BlendCfg, Weights};
pub use crate::error::{BlendError, Stage};
pub use crate::io::{load_points, parse_points, save_points};
