//! Upstream seams for road polylines and road-distance matrices.

use async_trait::async_trait;

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::Point;

/// Provides the road polyline between two points.
#[async_trait]
pub trait SegmentSource: Send + Sync {
    /// Returns the `(lat, lon)` polyline from `from` to `to`.
    async fn segment(&self, from: &Point, to: &Point) -> Result<Vec<(f64, f64)>>;
}

/// Provides a road-distance matrix for a city list.
///
/// Entry `(i, j)` must be the distance from `cities[i]` to `cities[j]`.
#[async_trait]
pub trait MatrixSource: Send + Sync {
    /// Returns the `cities.len()`-square matrix of road distances.
    async fn distance_matrix(&self, cities: &[Point]) -> Result<DistanceMatrix>;
}
