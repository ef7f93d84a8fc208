//! Selection of the edge-length source for a solve.

use serde::{Deserialize, Serialize};

use super::DistanceMatrix;
use crate::error::{Result, SolveError};
use crate::models::Point;

/// Where a solve takes its edge lengths from.
///
/// Solvers never see points directly: the model is resolved once into an
/// index-keyed [`DistanceMatrix`] for the request's city list.
///
/// # Examples
///
/// ```
/// use geotour::models::Point;
/// use geotour::distance::{DistanceMatrix, DistanceModel};
///
/// let cities = vec![Point::new("a", 0.0, 0.0), Point::new("b", 0.0, 1.0)];
/// let geo = DistanceModel::Geodesic.resolve(&cities).unwrap();
/// assert!(geo.get(0, 1) > 111.0);
///
/// let road = DistanceMatrix::from_rows(vec![vec![0.0, 130.0], vec![125.0, 0.0]]).unwrap();
/// let dm = DistanceModel::Matrix(road).resolve(&cities).unwrap();
/// assert_eq!(dm.get(1, 0), 125.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Haversine great-circle distance computed from coordinates.
    #[default]
    Geodesic,
    /// Precomputed distances keyed by city-list index, possibly asymmetric.
    Matrix(DistanceMatrix),
}

impl DistanceModel {
    /// Resolves this model into a matrix for `cities`.
    ///
    /// A supplied matrix must match the city count exactly; one built for a
    /// different list is rejected with [`SolveError::MatrixSizeMismatch`].
    pub fn resolve(&self, cities: &[Point]) -> Result<DistanceMatrix> {
        match self {
            DistanceModel::Geodesic => Ok(DistanceMatrix::from_points(cities)),
            DistanceModel::Matrix(dm) if dm.size() == cities.len() => Ok(dm.clone()),
            DistanceModel::Matrix(dm) => Err(SolveError::MatrixSizeMismatch {
                matrix: dm.size(),
                cities: cities.len(),
            }),
        }
    }
}
