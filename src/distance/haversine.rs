//! Great-circle distance on a spherical Earth.

use crate::models::Point;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two points, in kilometres.
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// d = 2·R·atan2(√a, √(1−a))
/// ```
///
/// # Examples
///
/// ```
/// use geotour::models::Point;
/// use geotour::distance::haversine_km;
///
/// let a = Point::new("a", 0.0, 0.0);
/// let b = Point::new("b", 0.0, 1.0);
/// // one degree of longitude on the equator
/// assert!((haversine_km(&a, &b) - 111.19).abs() < 0.01);
/// assert_eq!(haversine_km(&a, &a), 0.0);
/// ```
pub fn haversine_km(from: &Point, to: &Point) -> f64 {
    if from.same_location(to) {
        return 0.0;
    }
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();
    let dlat = (to.lat() - from.lat()).abs().to_radians();
    let dlon = (to.lon() - from.lon()).abs().to_radians();

    let s_lat = (dlat / 2.0).sin();
    let s_lon = (dlon / 2.0).sin();
    // rounding can push `a` a hair outside [0, 1] for antipodal points
    let a = (s_lat * s_lat + lat1.cos() * lat2.cos() * s_lon * s_lon).clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
