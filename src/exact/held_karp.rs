//! Held–Karp bitmask dynamic programming.
//!
//! # Algorithm
//!
//! `memo[mask][u]` is the cheapest path that starts at city 0, visits exactly
//! the cities in `mask` (city 0 always included) and ends at `u`:
//!
//! ```text
//! memo[{0}][0]  = 0
//! memo[mask][u] = min over v ∈ mask \ {u} of memo[mask \ {u}][v] + d(v, u)
//! answer        = min over u ≠ 0 of memo[full][u] + d(u, 0)
//! ```
//!
//! States that no path reaches stay `None` and are never extended, so even
//! sums that saturate to `inf` remain distinguishable from unreached. The tour is recovered by walking a parent table back from
//! the best final city.
//!
//! # Complexity
//!
//! O(2ⁿ · n²) time, O(2ⁿ · n) space.
//!
//! # Reference
//!
//! Held, M. & Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *J. SIAM* 10(1), 196-210.

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::solver::{SolverRun, Strategy, TourSolver};

/// Default tractability ceiling for Held–Karp.
pub const HELD_KARP_MAX_CITIES: usize = 9;

/// Exact solver using subset dynamic programming.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::exact::HeldKarp;
/// use geotour::solver::TourSolver;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 5.0, 1.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![5.0, 1.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
/// let run = HeldKarp::default().solve(&dm).unwrap();
/// assert_eq!(run.order[0], 0);
/// assert_eq!(run.order.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldKarp {
    max_cities: usize,
}

impl HeldKarp {
    /// Creates a Held–Karp solver refusing inputs above `max_cities`.
    pub fn new(max_cities: usize) -> Self {
        Self { max_cities }
    }

    /// The configured ceiling.
    pub fn max_cities(&self) -> usize {
        self.max_cities
    }
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self::new(HELD_KARP_MAX_CITIES)
    }
}

impl TourSolver for HeldKarp {
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverRun> {
        let n = distances.size();
        if n > self.max_cities {
            return Err(SolveError::TooManyCities {
                strategy: Strategy::Dynamic,
                count: n,
                max: self.max_cities,
            });
        }
        if n <= 1 {
            return Ok(SolverRun::new((0..n).collect()));
        }

        let states = 1usize << n;
        let full = states - 1;
        let idx = |mask: usize, u: usize| mask * n + u;

        let mut memo: Vec<Option<f64>> = vec![None; states * n];
        let mut parent: Vec<Option<usize>> = vec![None; states * n];
        memo[idx(1, 0)] = Some(0.0);

        // odd masks only: city 0 is always in the set
        for mask in (1..states).step_by(2) {
            for u in 1..n {
                if mask & (1 << u) == 0 {
                    continue;
                }
                let prev_mask = mask ^ (1 << u);
                for v in 0..n {
                    if v == u || prev_mask & (1 << v) == 0 {
                        continue;
                    }
                    let Some(base) = memo[idx(prev_mask, v)] else {
                        continue;
                    };
                    let cand = base + distances.get(v, u);
                    if memo[idx(mask, u)].map_or(true, |cur| cand < cur) {
                        memo[idx(mask, u)] = Some(cand);
                        parent[idx(mask, u)] = Some(v);
                    }
                }
            }
        }

        let mut best: Option<(usize, f64)> = None;
        for u in 1..n {
            let Some(base) = memo[idx(full, u)] else {
                continue;
            };
            let cost = base + distances.get(u, 0);
            if best.map_or(true, |(_, b)| cost < b) {
                best = Some((u, cost));
            }
        }

        let mut order = Vec::with_capacity(n);
        let mut mask = full;
        let mut current = best.map(|(u, _)| u);
        while let Some(u) = current {
            order.push(u);
            current = parent[idx(mask, u)];
            mask ^= 1 << u;
        }
        order.reverse();

        Ok(SolverRun::new(order))
    }
}
