//! 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! The tour is an open order with an implicit return edge; position 0 is the
//! fixed start. For each pair of edges `(o[i-1], o[i])` and `(o[j], o[j+1])`
//! with `1 ≤ i < j ≤ n-1` (where `o[n]` is `o[0]`), compute the change in
//! tour length from reversing the segment `o[i..=j]`:
//!
//! ```text
//! delta = d(o[i-1], o[j]) + d(o[i], o[j+1]) - d(o[i-1], o[i]) - d(o[j], o[j+1])
//! ```
//!
//! For asymmetric matrices the interior edges change direction too, so their
//! reversed cost minus their forward cost is added to `delta`.
//!
//! If `delta < -IMPROVEMENT_EPS` the segment is reversed on the spot and the
//! scan continues. Passes repeat until one makes no move. Every accepted move
//! strictly shortens the tour, so the search terminates.
//!
//! # Complexity
//!
//! O(n²) per pass for symmetric matrices, O(n³) per pass otherwise.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;
use crate::evaluation::order_distance;

/// Minimum decrease for a reversal to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Outcome of [`two_opt_improve`].
#[derive(Debug, Clone, PartialEq)]
pub struct TwoOptResult {
    /// Improved open order, still starting at the input's first city.
    pub order: Vec<usize>,
    /// Loop length of `order`.
    pub distance: f64,
    /// Number of accepted reversals.
    pub moves: usize,
    /// Number of full scans, including the final one that found nothing.
    pub passes: usize,
}

/// Applies 2-opt to an open tour until no improving reversal remains.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::evaluation::order_distance;
/// use geotour::local_search::two_opt_improve;
///
/// // unit square with a crossing: 0→2→1→3
/// let s = 2f64.sqrt();
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, s, 1.0],
///     vec![1.0, 0.0, 1.0, s],
///     vec![s, 1.0, 0.0, 1.0],
///     vec![1.0, s, 1.0, 0.0],
/// ]).unwrap();
/// let result = two_opt_improve(&[0, 2, 1, 3], &dm);
/// assert!((result.distance - 4.0).abs() < 1e-10);
/// assert_eq!(result.order[0], 0);
/// ```
pub fn two_opt_improve(order: &[usize], distances: &DistanceMatrix) -> TwoOptResult {
    improve_with(order, distances, |_| {})
}

/// Runs 2-opt, calling `on_move` with the order after every accepted reversal.
fn improve_with<F: FnMut(&[usize])>(
    order: &[usize],
    distances: &DistanceMatrix,
    mut on_move: F,
) -> TwoOptResult {
    let mut current = order.to_vec();
    let n = current.len();
    let symmetric = distances.is_symmetric(0.0);
    let mut moves = 0;
    let mut passes = 0;

    if n >= 3 {
        let mut improved = true;
        while improved {
            improved = false;
            passes += 1;
            for i in 1..n - 1 {
                for j in i + 1..n {
                    let mut delta = endpoint_delta(&current, distances, i, j);
                    if !symmetric {
                        delta += interior_delta(&current, distances, i, j);
                    }
                    if delta < -IMPROVEMENT_EPS {
                        current[i..=j].reverse();
                        moves += 1;
                        improved = true;
                        on_move(&current);
                    }
                }
            }
        }
    }

    let distance = order_distance(&current, distances);
    TwoOptResult {
        order: current,
        distance,
        moves,
        passes,
    }
}

/// Change in the two boundary edges when `route[i..=j]` is reversed.
fn endpoint_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = route.len();
    let prev = route[i - 1];
    let next = if j + 1 == n { route[0] } else { route[j + 1] };

    let old_cost = distances.get(prev, route[i]) + distances.get(route[j], next);
    let new_cost = distances.get(prev, route[j]) + distances.get(route[i], next);

    new_cost - old_cost
}

/// Change in the segment's own edges when it is traversed backwards.
fn interior_delta(route: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    route[i..=j]
        .windows(2)
        .map(|w| distances.get(w[1], w[0]) - distances.get(w[0], w[1]))
        .sum()
}
