//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from the first city, always move to the
//! nearest unvisited city, then return to the start. Ties go to the city
//! that comes first among the remaining ones.
//!
//! # Complexity
//!
//! O(n²) where n = number of cities.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. While tour
//! quality is typically 15-25% above optimal, it provides a fast starting
//! point for [`two_opt_improve`].

use tracing::debug;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::local_search::two_opt_improve;
use crate::solver::{SolverRun, TourSolver};

/// Constructs an open tour from `start` using the nearest-neighbor rule.
///
/// # Examples
///
/// ```
/// use geotour::models::Point;
/// use geotour::distance::DistanceMatrix;
/// use geotour::constructive::nearest_neighbor;
///
/// let cities = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("far", 0.0, 3.0),
///     Point::new("near", 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&cities);
/// assert_eq!(nearest_neighbor(&dm, 0), vec![0, 2, 1]);
/// ```
pub fn nearest_neighbor(distances: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).filter(|&i| i != start).collect();
    let mut order = Vec::with_capacity(n);
    order.push(start);
    let mut current = start;

    while let Some(next) = distances.nearest_neighbor(current, &remaining) {
        remaining.retain(|&c| c != next);
        order.push(next);
        current = next;
    }

    order
}

/// Approximate solver: nearest-neighbor construction refined by 2-opt.
///
/// Has no size ceiling.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::constructive::NearestNeighborTwoOpt;
/// use geotour::solver::TourSolver;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 5.0, 1.0],
///     vec![1.0, 0.0, 1.0, 5.0],
///     vec![5.0, 1.0, 0.0, 1.0],
///     vec![1.0, 5.0, 1.0, 0.0],
/// ]).unwrap();
/// let run = NearestNeighborTwoOpt.solve(&dm).unwrap();
/// assert_eq!(run.order, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NearestNeighborTwoOpt;

impl TourSolver for NearestNeighborTwoOpt {
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverRun> {
        let initial = nearest_neighbor(distances, 0);
        let improved = two_opt_improve(&initial, distances);
        debug!(
            cities = distances.size(),
            moves = improved.moves,
            passes = improved.passes,
            distance = improved.distance,
            "2-opt converged"
        );
        let mut run = SolverRun::new(improved.order);
        run.improvements = Some(improved.moves);
        Ok(run)
    }
}
