use crate::config::Weights;
use crate::geom2::{Corner, GeomCfg, Intrinsics};

/// Bi-criteria corner similarity: `w1 · edge-ratio + w2 · angle`.
///
/// - edge-ratio: `1 − |e1_A e2_B − e1_B e2_A| / (e1_A e2_B + e1_B e2_A)`, or 1 when
///   the denominator is below `cfg.eps_sim_den`.
/// - angle: `1 − |angle_A − angle_B| / 360` on the corner angle at `curr`.
pub fn sim_t(a: &Corner, b: &Corner, w: &Weights, cfg: &GeomCfg) -> f64 {
    let num = (a.e1 * b.e2 - b.e1 * a.e2).abs();
    let den = a.e1 * b.e2 + b.e1 * a.e2;
    let sim_edges = if den < cfg.eps_sim_den {
        1.0
    } else {
        1.0 - num / den
    };
    let sim_angles = 1.0 - (a.angle_curr - b.angle_curr).abs() / 360.0;
    w.w1 * sim_edges + w.w2() * sim_angles
}

/// Dense `m × n` alignment cost `1 − sim_t`, row-major (row = A corner).
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    pub fn build(a: &Intrinsics, b: &Intrinsics, w: &Weights, cfg: &GeomCfg) -> Self {
        let (rows, cols) = (a.len(), b.len());
        let mut data = Vec::with_capacity(rows * cols);
        for ca in &a.corners {
            for cb in &b.corners {
                data.push(1.0 - sim_t(ca, cb, w, cfg));
            }
        }
        Self { rows, cols, data }
    }

    /// Wrap an explicit row-major buffer; `None` on a size mismatch.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}
