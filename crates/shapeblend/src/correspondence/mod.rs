//! Monotone vertex correspondence between two polygons.
//!
//! Purpose
//! - Score every corner pair `(i_A, j_B)` with the bi-criteria similarity
//!   `sim_t` and materialize the dense cost `1 − sim_t` (`cost.rs`).
//! - Find the minimum-cost staircase path through the cost grid, optionally
//!   over all cyclic start offsets of A (`dp.rs`).
//!
//! Design notes
//! - One explicit DP re-solve per offset (O(m²n) for the automatic search).
//!   The doubled-axis single-pass variant is not equivalent and is not offered.
//! - The path only moves "south" (next A, same B) or "southeast" (next A, next
//!   B); ties prefer southeast. Several consecutive A corners may therefore map
//!   to one B corner when `m > n`.
//!
//! Code cross-refs: `geom2::Intrinsics`, `basis::select_basis`, `blender::ShapeBlender`

mod cost;
mod dp;

pub use cost::{sim_t, CostMatrix};
pub use dp::{solve, solve_with, Correspondence, Offset};

#[cfg(test)]
mod tests;
