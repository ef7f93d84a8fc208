//! Distance computation.
//!
//! Provides the haversine metric, a dense index-keyed distance matrix, and
//! the model that chooses between geodesic and externally supplied distances.

mod haversine;
mod matrix;
mod model;

pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
pub use model::DistanceModel;
