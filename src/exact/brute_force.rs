//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! City 0 is fixed as the start, which removes rotations of the same loop.
//! The remaining `n - 1` cities are enumerated in lexicographic order and
//! every ordering is scored with [`order_distance`]. A candidate replaces the
//! incumbent only if it is strictly shorter, so the first minimal ordering in
//! generation order wins.
//!
//! # Complexity
//!
//! O(n!) time, O(n) space. Callers must enforce a ceiling.

use crate::distance::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::evaluation::order_distance;
use crate::solver::{SolverRun, Strategy, TourSolver};

/// Default tractability ceiling for brute force.
pub const BRUTE_FORCE_MAX_CITIES: usize = 9;

/// Exact solver that scores every ordering of the cities.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::exact::BruteForce;
/// use geotour::solver::TourSolver;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 5.0, 1.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![5.0, 1.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
/// let run = BruteForce::default().solve(&dm).unwrap();
/// assert_eq!(run.order, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BruteForce {
    max_cities: usize,
}

impl BruteForce {
    /// Creates a brute-force solver refusing inputs above `max_cities`.
    pub fn new(max_cities: usize) -> Self {
        Self { max_cities }
    }

    /// The configured ceiling.
    pub fn max_cities(&self) -> usize {
        self.max_cities
    }
}

impl Default for BruteForce {
    fn default() -> Self {
        Self::new(BRUTE_FORCE_MAX_CITIES)
    }
}

impl TourSolver for BruteForce {
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverRun> {
        let n = distances.size();
        if n > self.max_cities {
            return Err(SolveError::TooManyCities {
                strategy: Strategy::BruteForce,
                count: n,
                max: self.max_cities,
            });
        }
        if n == 0 {
            return Ok(SolverRun::new(Vec::new()));
        }

        let mut current: Vec<usize> = (0..n).collect();
        let mut best = current.clone();
        let mut best_dist = order_distance(&current, distances);

        while next_permutation(&mut current[1..]) {
            let dist = order_distance(&current, distances);
            if dist < best_dist {
                best_dist = dist;
                best.copy_from_slice(&current);
            }
        }

        Ok(SolverRun::new(best))
    }
}

/// Advances `perm` to the next lexicographic permutation in place.
///
/// Returns `false` (leaving `perm` untouched) once the last permutation has
/// been reached.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}
