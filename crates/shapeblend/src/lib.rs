//! Shape-aware polygon blending.
//!
//! Pipeline
//! - `geom2`: polygons, per-corner intrinsics, tolerances, random sampling.
//! - `correspondence`: monotone vertex map from A onto B with cyclic offset search.
//! - `basis`: three-pair affine frame chosen by the `smooth_a` score.
//! - `interp`: rotation-aware affine interpolation of every vertex.
//! - `blender`: session object that runs the steps in order and caches results.
//!
//! API Policy
//! - `api` is the curated surface for callers (CLI, benches); module paths may move.

pub mod api;
pub mod basis;
pub mod blender;
pub mod config;
pub mod correspondence;
pub mod error;
pub mod geom2;
pub mod interp;
pub mod io;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use blender::ShapeBlender;
pub use config::{BlendCfg, Weights};
pub use error::BlendError;
pub use geom2::{Aff2, GeomCfg, Polygon};
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::basis::{AffineBasis, BasisQuality, BasisSelection};
    pub use crate::blender::ShapeBlender;
    pub use crate::config::{BlendCfg, Weights};
    pub use crate::correspondence::{Correspondence, Offset};
    pub use crate::error::BlendError;
    pub use crate::geom2::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::geom2::{Aff2, GeomCfg, Polygon};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
