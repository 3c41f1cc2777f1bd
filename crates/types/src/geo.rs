//! Geographic coordinate type and distance metrics.
//!
//! Coordinates are stored latitude-first, the order used by geohash query
//! construction. Conversions to and from `geo::Point` (x = longitude,
//! y = latitude) are provided for interop with the `geo` crate.

use serde::{Deserialize, Serialize};

/// Distance metric for exact point-to-point checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// A geographic coordinate in degrees.
///
/// # Examples
///
/// ```
/// use geoscan_types::geo::Coordinate;
///
/// let sf = Coordinate::new(37.7749, -122.4194);
/// assert_eq!(sf.latitude, 37.7749);
/// assert_eq!(sf.longitude, -122.4194);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, expected within [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, expected within [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Convert into a `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

/// `(latitude, longitude)` tuples.
impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
