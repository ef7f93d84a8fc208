//! Tour length and validity checks.

use crate::distance::DistanceMatrix;
use crate::models::Point;

/// Total great-circle length of a point sequence, in kilometres.
///
/// Sums consecutive edges. If the sequence is open (first and last points
/// have different coordinates) the closing edge back to the start is added
/// once; a sequence that already repeats its start is not charged twice.
/// Sequences of zero or one point have length `0.0`.
///
/// # Examples
///
/// ```
/// use geotour::models::Point;
/// use geotour::evaluation::{close_loop, total_distance};
///
/// let open = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 1.0),
///     Point::new("c", 1.0, 1.0),
/// ];
/// let closed = close_loop(&open);
/// assert_eq!(closed.len(), 4);
/// assert!((total_distance(&open) - total_distance(&closed)).abs() < 1e-9);
/// ```
pub fn total_distance(points: &[Point]) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) if points.len() >= 2 => (f, l),
        _ => return 0.0,
    };
    let mut dist: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    if !first.same_location(last) {
        dist += last.distance_to(first);
    }
    dist
}

/// Returns `points` with the start appended, unless it is already closed.
pub fn close_loop(points: &[Point]) -> Vec<Point> {
    let mut closed = points.to_vec();
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() < 2 || !first.same_location(last) => {
            closed.push(first.clone());
        }
        _ => {}
    }
    closed
}

/// Length of an open tour given as indices, including the return edge.
///
/// Edges are looked up in travel direction: `order[k] → order[k + 1]`, then
/// `order[n - 1] → order[0]`.
pub fn order_distance(order: &[usize], distances: &DistanceMatrix) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let inner: f64 = order.windows(2).map(|w| distances.get(w[0], w[1])).sum();
    inner + distances.get(order[order.len() - 1], order[0])
}

/// Returns `true` if `order` visits each of `0..n` exactly once.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in order {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
