//! Scalar weights for the similarity and basis-quality functions.
//!
//! Policy
//! - Weights live in a plain value held by the blend session and passed by
//!   reference into scoring; nothing mutates them behind the caller's back.
//! - Only the independent weights are stored; the dependent ones (`w2`, `wa`)
//!   are derived so the sums stay 1 by construction.

use serde::{Deserialize, Serialize};

use crate::geom2::GeomCfg;

/// Weights of `sim_t` (`w1`, `w2 = 1 − w1`) and `smooth_a` (`ws`, `wr`, `wa = 1 − ws − wr`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub w1: f64,
    pub ws: f64,
    pub wr: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w1: 0.5,
            ws: 0.5,
            wr: 0.3,
        }
    }
}

impl Weights {
    /// Angle weight in `sim_t`.
    #[inline]
    pub fn w2(&self) -> f64 {
        1.0 - self.w1
    }

    /// Area weight in `smooth_a`.
    #[inline]
    pub fn wa(&self) -> f64 {
        (1.0 - self.ws - self.wr).max(0.0)
    }

    /// Clamp every weight into [0, 1] and enforce `ws + wr ≤ 1` by lowering `wr`.
    ///
    /// Non-finite inputs fall back to the defaults for that field.
    pub fn normalized(self) -> Self {
        let d = Self::default();
        let clamp = |v: f64, fallback: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { fallback };
        let w1 = clamp(self.w1, d.w1);
        let ws = clamp(self.ws, d.ws);
        let wr = clamp(self.wr, d.wr).min(1.0 - ws);
        Self { w1, ws, wr }
    }
}

/// Full configuration of one blend session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendCfg {
    pub weights: Weights,
    pub geom: GeomCfg,
}
