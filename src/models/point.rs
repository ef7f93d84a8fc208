//! Geographic point type.

use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;

/// A named location given in degrees of latitude and longitude.
///
/// Names are opaque labels and need not be unique. Two points describe the
/// same stop when their coordinates are identical (see
/// [`same_location`](Point::same_location)).
///
/// # Examples
///
/// ```
/// use geotour::models::Point;
///
/// let prishtina = Point::new("Prishtina", 42.6629, 21.1655);
/// assert_eq!(prishtina.name(), "Prishtina");
/// assert_eq!(prishtina.lat(), 42.6629);
/// assert_eq!(prishtina.lon(), 21.1655);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    name: String,
    lat: f64,
    lon: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both points have identical coordinates.
    pub fn same_location(&self, other: &Point) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_km(self, other)
    }
}
