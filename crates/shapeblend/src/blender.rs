//! Blend session: two polygons, weights, and the derived pipeline state.
//!
//! Usage order: load or set polygons → `compute_correspondence` →
//! `find_optimal_basis` → `interpolated_polygon(t)` for any number of `t`.
//! Each step invalidates everything downstream of it. A failed load or
//! correspondence solve leaves the previously committed state untouched.
//!
//! The session is single-owner: mutate and query it from one place.

use std::path::Path;

use crate::basis::{select_basis, BasisSelection};
use crate::config::{BlendCfg, Weights};
use crate::correspondence::{self, Correspondence, CostMatrix, Offset};
use crate::error::{BlendError, Stage};
use crate::geom2::{Polygon, Shape};
use crate::interp::MorphPlan;
use crate::io::load_points;

#[derive(Clone, Debug, Default)]
pub struct ShapeBlender {
    cfg: BlendCfg,
    shapes: Option<(Shape, Shape)>,
    correspondence: Option<Correspondence>,
    basis: Option<BasisSelection>,
    plan: Option<MorphPlan>,
}

impl ShapeBlender {
    pub fn new(cfg: BlendCfg) -> Self {
        Self {
            cfg: BlendCfg {
                weights: cfg.weights.normalized(),
                geom: cfg.geom,
            },
            ..Self::default()
        }
    }

    pub fn from_polygons(a: Polygon, b: Polygon, cfg: BlendCfg) -> Self {
        let mut blender = Self::new(cfg);
        blender.set_polygons(a, b);
        blender
    }

    /// Load A and B from JSON point lists; commits only if both load.
    pub fn load_polygons<P: AsRef<Path>, Q: AsRef<Path>>(
        &mut self,
        path_a: P,
        path_b: Q,
    ) -> Result<(), BlendError> {
        let a = load_points(path_a)?;
        let b = load_points(path_b)?;
        self.set_polygons(a, b);
        Ok(())
    }

    /// Replace both polygons. B is reversed when its winding differs from A's.
    pub fn set_polygons(&mut self, a: Polygon, b: Polygon) {
        let b = if a.winding() != b.winding() {
            tracing::info!("winding mismatch, reversing polygon B");
            b.reversed()
        } else {
            b
        };
        tracing::info!(m = a.len(), n = b.len(), "polygons set");
        let geom = &self.cfg.geom;
        self.shapes = Some((Shape::new(a, geom), Shape::new(b, geom)));
        self.invalidate();
    }

    /// Replace the weights (normalized); derived state is dropped.
    pub fn set_weights(&mut self, weights: Weights) {
        self.cfg.weights = weights.normalized();
        self.invalidate();
    }

    pub fn compute_correspondence(&mut self, offset: Offset) -> Result<&Correspondence, BlendError> {
        self.compute_correspondence_with(offset, |_| true)
    }

    /// As `compute_correspondence`, consulting `keep_going(k)` before each offset trial.
    pub fn compute_correspondence_with<F>(
        &mut self,
        offset: Offset,
        keep_going: F,
    ) -> Result<&Correspondence, BlendError>
    where
        F: FnMut(usize) -> bool,
    {
        let cost = self.cost_matrix()?;
        let corr = correspondence::solve_with(&cost, offset, keep_going)?;
        self.invalidate();
        Ok(self.correspondence.insert(corr))
    }

    /// Dense cost matrix for the current polygons and weights.
    pub fn cost_matrix(&self) -> Result<CostMatrix, BlendError> {
        let (a, b) = self.shapes()?;
        Ok(CostMatrix::build(
            a.intr(),
            b.intr(),
            &self.cfg.weights,
            &self.cfg.geom,
        ))
    }

    /// Select the basis for the current correspondence and prepare interpolation.
    ///
    /// A degraded selection is still stored; if its triangles are unusable the
    /// plan is not built and `DegenerateBasis` is returned.
    pub fn find_optimal_basis(&mut self) -> Result<&BasisSelection, BlendError> {
        let (a, b) = self.shapes()?;
        let corr = self
            .correspondence
            .as_ref()
            .ok_or(BlendError::NotReady(Stage::Correspondence))?;
        let sel = select_basis(corr, a, b, &self.cfg.weights, &self.cfg.geom);
        let plan = MorphPlan::new(a.poly(), b.poly(), corr, &sel.basis, &self.cfg.geom);
        self.plan = None;
        let sel = self.basis.insert(sel);
        self.plan = Some(plan?);
        Ok(&*sel)
    }

    /// Intermediate polygon at `t` (0 → A, 1 → B's corresponded vertices).
    pub fn interpolated_polygon(&self, t: f64) -> Result<Polygon, BlendError> {
        self.plan
            .as_ref()
            .map(|plan| plan.at(t))
            .ok_or(BlendError::NotReady(Stage::Basis))
    }

    pub fn poly_a(&self) -> Option<&Polygon> {
        self.shapes.as_ref().map(|(a, _)| a.poly())
    }

    pub fn poly_b(&self) -> Option<&Polygon> {
        self.shapes.as_ref().map(|(_, b)| b.poly())
    }

    pub fn correspondence(&self) -> Option<&Correspondence> {
        self.correspondence.as_ref()
    }

    pub fn basis(&self) -> Option<&BasisSelection> {
        self.basis.as_ref()
    }

    pub fn plan(&self) -> Option<&MorphPlan> {
        self.plan.as_ref()
    }

    /// Cyclic offset chosen by the last correspondence solve.
    pub fn best_offset(&self) -> Option<usize> {
        self.correspondence.as_ref().map(Correspondence::offset)
    }

    pub fn cfg(&self) -> &BlendCfg {
        &self.cfg
    }

    pub fn weights(&self) -> &Weights {
        &self.cfg.weights
    }

    fn shapes(&self) -> Result<(&Shape, &Shape), BlendError> {
        self.shapes
            .as_ref()
            .map(|(a, b)| (a, b))
            .ok_or(BlendError::NotReady(Stage::Polygons))
    }

    fn invalidate(&mut self) {
        self.correspondence = None;
        self.basis = None;
        self.plan = None;
    }
}
