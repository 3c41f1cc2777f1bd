//! Exact distances for post-filtering range scan candidates.

use geo::{Distance, Geodesic, Haversine, Rhumb};
use geoscan_types::geo::{Coordinate, DistanceMetric};

/// Distance between two coordinates in meters.
///
/// # Examples
///
/// ```
/// use geoscan::compute::distance::distance_between;
/// use geoscan::{Coordinate, DistanceMetric};
///
/// let nyc = Coordinate::new(40.7128, -74.0060);
/// let la = Coordinate::new(34.0522, -118.2437);
/// let d = distance_between(&nyc, &la, DistanceMetric::Haversine);
/// assert!(d > 3_900_000.0 && d < 4_000_000.0);
/// ```
pub fn distance_between(a: &Coordinate, b: &Coordinate, metric: DistanceMetric) -> f64 {
    let (p, q) = (a.to_point(), b.to_point());
    match metric {
        DistanceMetric::Haversine => Haversine.distance(p, q),
        DistanceMetric::Geodesic => Geodesic.distance(p, q),
        DistanceMetric::Rhumb => Rhumb.distance(p, q),
    }
}
