//! Conversions between real-world distances and geohash bit budgets.
//!
//! Longitude degrees shrink toward the poles, so the number of longitude bits
//! needed for a given resolution depends on latitude. Latitude degrees are
//! treated as constant length.

use super::geohash::MAX_BITS;

/// Earth's meridional circumference, meters.
pub const EARTH_MERIDIONAL_CIRCUMFERENCE: f64 = 40_007_860.0;

/// WGS84 equatorial radius, meters.
pub const EARTH_EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// WGS84 first eccentricity squared.
pub const EARTH_ECCENTRICITY_SQUARED: f64 = 0.00669447819799;

/// Below this, a longitude delta is treated as zero width.
const LONGITUDE_DEGREES_EPSILON: f64 = 1e-6;

/// Below this, the degree length of a parallel is treated as zero (poles).
const DEGREE_LENGTH_EPSILON: f64 = 1e-12;

/// Bits of latitude refinement needed for cells no taller than `resolution`
/// meters, capped at [`MAX_BITS`].
///
/// # Examples
///
/// ```
/// use geoscan::compute::resolution::latitude_bits_for_resolution;
///
/// let bits = latitude_bits_for_resolution(1000.0);
/// assert!((bits - 14.2880).abs() < 1e-3);
/// assert_eq!(latitude_bits_for_resolution(0.0), 110.0);
/// ```
pub fn latitude_bits_for_resolution(resolution: f64) -> f64 {
    (EARTH_MERIDIONAL_CIRCUMFERENCE / 2.0 / resolution)
        .log2()
        .min(MAX_BITS as f64)
}

/// Bits of longitude refinement needed for cells no wider than `resolution`
/// meters at `latitude`. Never less than 1.
pub fn longitude_bits_for_resolution(resolution: f64, latitude: f64) -> f64 {
    let degrees = meters_to_longitude_degrees(resolution, latitude);
    if degrees.abs() > LONGITUDE_DEGREES_EPSILON {
        (360.0 / degrees).log2().max(1.0)
    } else {
        1.0
    }
}

/// Longitude span, in degrees, of `distance` meters along the parallel at
/// `latitude`, using the WGS84 ellipsoid. Capped at 360.
///
/// At the poles every parallel collapses to a point: any positive distance
/// spans the full 360 degrees and a zero distance spans nothing.
///
/// # Examples
///
/// ```
/// use geoscan::compute::resolution::meters_to_longitude_degrees;
///
/// let at_equator = meters_to_longitude_degrees(111_319.49, 0.0);
/// assert!((at_equator - 1.0).abs() < 1e-6);
///
/// assert_eq!(meters_to_longitude_degrees(1000.0, 90.0), 360.0);
/// assert_eq!(meters_to_longitude_degrees(0.0, 90.0), 0.0);
/// ```
pub fn meters_to_longitude_degrees(distance: f64, latitude: f64) -> f64 {
    let radians = latitude.to_radians();
    let sin = radians.sin();
    let num = radians.cos() * EARTH_EQUATORIAL_RADIUS * std::f64::consts::PI / 180.0;
    let denom = 1.0 / (1.0 - EARTH_ECCENTRICITY_SQUARED * sin * sin).sqrt();
    let meters_per_degree = num * denom;

    if meters_per_degree < DEGREE_LENGTH_EPSILON {
        if distance > 0.0 { 360.0 } else { 0.0 }
    } else {
        (distance / meters_per_degree).min(360.0)
    }
}
