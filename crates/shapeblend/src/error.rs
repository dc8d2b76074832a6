//! Error type shared by the blend pipeline.
//!
//! Input errors abort the affected step and leave previously committed state
//! untouched. Numerical degeneracies inside similarity/score functions are not
//! errors (they map to documented constants); only a singular interpolation
//! frame is surfaced here.

use std::fmt;
use std::path::PathBuf;

/// Pipeline stage a caller tried to run too early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Polygons,
    Correspondence,
    Basis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Polygons => write!(f, "polygons"),
            Stage::Correspondence => write!(f, "correspondence"),
            Stage::Basis => write!(f, "basis"),
        }
    }
}

/// Errors surfaced by loading, solving and interpolation.
#[derive(Debug)]
pub enum BlendError {
    TooFewVertices { count: usize },
    Load { path: PathBuf, reason: String },
    /// Correspondence needs `m >= n`; the caller swaps inputs.
    VertexCountOrder { m: usize, n: usize },
    InvalidOffset { offset: usize, m: usize },
    NotReady(Stage),
    /// A basis triangle is too thin to serve as a local frame.
    DegenerateBasis { area_a: f64, area_b: f64 },
    Interrupted { offset: usize },
}

impl BlendError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for BlendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { count } => {
                write!(f, "polygon needs at least 3 vertices, got {count}")
            }
            Self::Load { path, reason } => {
                write!(f, "failed to load polygon {}: {reason}", path.display())
            }
            Self::VertexCountOrder { m, n } => write!(
                f,
                "polygon A ({m} vertices) must have at least as many vertices as polygon B ({n})"
            ),
            Self::InvalidOffset { offset, m } => {
                write!(f, "cyclic offset {offset} out of range for {m} vertices")
            }
            Self::NotReady(stage) => write!(f, "{stage} not computed yet"),
            Self::DegenerateBasis { area_a, area_b } => write!(
                f,
                "degenerate basis triangle (area A = {area_a:.3e}, area B = {area_b:.3e})"
            ),
            Self::Interrupted { offset } => {
                write!(f, "offset search interrupted before trial k = {offset}")
            }
        }
    }
}

impl std::error::Error for BlendError {}
