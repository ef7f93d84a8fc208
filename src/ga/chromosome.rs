//! Permutation chromosome for the genetic search.
//!
//! An individual is an ordering of all city indices; its loop length is
//! cached at construction so sorting the population never re-scores it.

use crate::distance::DistanceMatrix;
use crate::evaluation::order_distance;

/// A candidate tour: a permutation of city indices and its loop length.
///
/// Lower distance = better individual.
///
/// # Examples
///
/// ```
/// use geotour::distance::DistanceMatrix;
/// use geotour::ga::Chromosome;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 3.0],
///     vec![2.0, 3.0, 0.0],
/// ]).unwrap();
/// let c = Chromosome::evaluated(vec![2, 0, 1], &dm);
/// assert_eq!(c.order(), &[2, 0, 1]);
/// assert_eq!(c.distance(), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    order: Vec<usize>,
    distance: f64,
}

impl Chromosome {
    /// Creates a chromosome and scores it against `distances`.
    pub fn evaluated(order: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let distance = order_distance(&order, distances);
        Self { order, distance }
    }

    /// Returns the city permutation.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the chromosome, returning its permutation.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Loop length of this ordering.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Inverse loop length; higher is fitter.
    pub fn fitness(&self) -> f64 {
        if self.distance > 0.0 {
            1.0 / self.distance
        } else {
            f64::INFINITY
        }
    }

    /// Returns the number of cities in this chromosome.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the chromosome has no cities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
