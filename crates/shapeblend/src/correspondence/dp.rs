//! Staircase DP over the cost grid with cyclic offset search.
//!
//! For an offset `k` the grid row `i` is A corner `(i + k) mod m`:
//! - `D(0,0) = c(0,0)`, `D(i,0) = D(i−1,0) + c(i,0)`, `D(0,j>0) = ∞`
//! - `D(i,j) = c(i,j) + min(D(i−1,j), D(i−1,j−1))` for `j ≤ i`, else `∞`
//!
//! The automatic search runs a cost-only pass (two rolling rows) per offset and
//! re-runs the winner with the full step table for backtracking. Both passes
//! perform the same floating-point operations, so the totals agree exactly.

use serde::{Deserialize, Serialize};

use super::cost::CostMatrix;
use crate::error::BlendError;

/// How the cyclic start of polygon A is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Offset {
    /// Try all `m` offsets, keep the smallest total cost (smallest `k` on ties).
    #[default]
    Auto,
    Manual(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Start,
    South,
    SouthEast,
    Unreachable,
}

/// A monotone mapping from every A index to a B index.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Correspondence {
    /// `map[i_A] = i_B`.
    map: Vec<usize>,
    offset: usize,
    total_cost: f64,
}

impl Correspondence {
    #[inline]
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Cyclic start of A: `A[offset]` maps to `B[0]`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// `D(m−1, n−1)` of the winning offset.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn target(&self, i_a: usize) -> usize {
        self.map[i_a]
    }

    /// `(i_A, i_B)` pairs in increasing A index.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map.iter().copied().enumerate()
    }

    /// `(i_A, i_B)` pairs in path order, starting at `A[offset]`.
    pub fn path(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let m = self.map.len();
        (0..m).map(move |i| {
            let a = (i + self.offset) % m;
            (a, self.map[a])
        })
    }

    /// Sum of `cost(i_A, i_B)` over all pairs.
    pub fn path_cost(&self, cost: &CostMatrix) -> f64 {
        self.path().map(|(a, b)| cost.get(a, b)).sum()
    }

    /// B targets read in path order never decrease.
    pub fn is_monotone(&self) -> bool {
        let mut last = 0;
        self.path().all(|(_, b)| {
            let ok = b >= last;
            last = b;
            ok
        })
    }

    /// Build from an explicit map (e.g. a hand-made or externally loaded alignment).
    pub fn from_map(map: Vec<usize>, offset: usize, total_cost: f64) -> Self {
        Self {
            map,
            offset,
            total_cost,
        }
    }
}

/// Solve without interruption.
pub fn solve(cost: &CostMatrix, offset: Offset) -> Result<Correspondence, BlendError> {
    solve_with(cost, offset, |_| true)
}

/// Solve, calling `keep_going(k)` before each automatic offset trial.
///
/// Returns `Interrupted { offset: k }` as soon as `keep_going` answers false.
pub fn solve_with<F>(
    cost: &CostMatrix,
    offset: Offset,
    mut keep_going: F,
) -> Result<Correspondence, BlendError>
where
    F: FnMut(usize) -> bool,
{
    let (m, n) = (cost.rows(), cost.cols());
    if n == 0 {
        return Err(BlendError::TooFewVertices { count: 0 });
    }
    if m < n {
        return Err(BlendError::VertexCountOrder { m, n });
    }
    let k = match offset {
        Offset::Manual(k) if k >= m => return Err(BlendError::InvalidOffset { offset: k, m }),
        Offset::Manual(k) => {
            tracing::debug!(k, m, n, "correspondence: manual offset, O(m·n)");
            k
        }
        Offset::Auto => {
            tracing::debug!(m, n, "correspondence: offset search, O(m²·n)");
            let mut prev = vec![0.0; n];
            let mut cur = vec![0.0; n];
            let mut best = (f64::INFINITY, 0usize);
            for k in 0..m {
                if !keep_going(k) {
                    return Err(BlendError::Interrupted { offset: k });
                }
                let total = cost_only_pass(cost, k, &mut prev, &mut cur);
                if total < best.0 {
                    best = (total, k);
                }
            }
            best.1
        }
    };

    let (total_cost, steps) = full_pass(cost, k);
    let map = backtrack(&steps, m, n, k);
    tracing::info!(offset = k, total_cost, m, n, "correspondence solved");
    Ok(Correspondence {
        map,
        offset: k,
        total_cost,
    })
}

#[inline]
fn shifted(cost: &CostMatrix, k: usize, i: usize, j: usize) -> f64 {
    cost.get((i + k) % cost.rows(), j)
}

fn cost_only_pass(cost: &CostMatrix, k: usize, prev: &mut Vec<f64>, cur: &mut Vec<f64>) -> f64 {
    let (m, n) = (cost.rows(), cost.cols());
    cur.fill(f64::INFINITY);
    cur[0] = shifted(cost, k, 0, 0);
    for i in 1..m {
        std::mem::swap(prev, cur);
        cur[0] = prev[0] + shifted(cost, k, i, 0);
        for j in 1..n {
            cur[j] = if j > i {
                f64::INFINITY
            } else {
                let (s, se) = (prev[j], prev[j - 1]);
                let best = if s < se { s } else { se };
                best + shifted(cost, k, i, j)
            };
        }
    }
    cur[n - 1]
}

fn full_pass(cost: &CostMatrix, k: usize) -> (f64, Vec<Step>) {
    let (m, n) = (cost.rows(), cost.cols());
    let mut d = vec![f64::INFINITY; m * n];
    let mut steps = vec![Step::Unreachable; m * n];
    d[0] = shifted(cost, k, 0, 0);
    steps[0] = Step::Start;
    for i in 1..m {
        d[i * n] = d[(i - 1) * n] + shifted(cost, k, i, 0);
        steps[i * n] = Step::South;
        for j in 1..n.min(i + 1) {
            let s = d[(i - 1) * n + j];
            let se = d[(i - 1) * n + j - 1];
            // Southeast wins ties (and any comparison involving NaN).
            let (best, step) = if s < se {
                (s, Step::South)
            } else {
                (se, Step::SouthEast)
            };
            d[i * n + j] = best + shifted(cost, k, i, j);
            steps[i * n + j] = step;
        }
    }
    (d[m * n - 1], steps)
}

fn backtrack(steps: &[Step], m: usize, n: usize, k: usize) -> Vec<usize> {
    let mut map = vec![0; m];
    let (mut i, mut j) = (m - 1, n - 1);
    loop {
        map[(i + k) % m] = j;
        match steps[i * n + j] {
            Step::SouthEast => {
                i -= 1;
                j -= 1;
            }
            Step::South => i -= 1,
            // Only (0,0) is a start; unreachable cells are never entered from a finite path.
            Step::Start | Step::Unreachable => break,
        }
    }
    map
}
