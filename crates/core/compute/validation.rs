//! Validation for coordinates, radii, geohashes and precision values.

use super::geohash::{MAX_PRECISION, alphabet_index};
use crate::error::{GeoScanError, Result};
use geoscan_types::geo::Coordinate;

/// Validates a coordinate has finite, in-range latitude and longitude.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geoscan::compute::validation::validate_location;
/// use geoscan::Coordinate;
///
/// assert!(validate_location(&Coordinate::new(37.7749, -122.4194)).is_ok());
/// assert!(validate_location(&Coordinate::new(95.0, 0.0)).is_err());
/// assert!(validate_location(&Coordinate::new(0.0, 200.0)).is_err());
/// ```
pub fn validate_location(location: &Coordinate) -> Result<()> {
    if location.is_valid() {
        return Ok(());
    }

    let (lat, lon) = (location.latitude, location.longitude);

    if !lat.is_finite() {
        return Err(GeoScanError::invalid(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(GeoScanError::invalid(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoScanError::invalid(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoScanError::invalid(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    Err(GeoScanError::invalid(format!("Invalid coordinate: {}", location)))
}

/// Validates a query radius is finite and strictly positive.
///
/// # Examples
///
/// ```
/// use geoscan::compute::validation::validate_radius;
///
/// assert!(validate_radius(1000.0).is_ok());
/// assert!(validate_radius(0.0).is_err());
/// assert!(validate_radius(-100.0).is_err());
/// assert!(validate_radius(f64::NAN).is_err());
/// ```
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(GeoScanError::invalid(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }

    if radius <= 0.0 {
        return Err(GeoScanError::invalid(format!(
            "Radius must be positive, got: {}",
            radius
        )));
    }

    Ok(())
}

/// Validates a geohash is non-empty and uses only the base-32 alphabet.
pub fn validate_geohash(geohash: &str) -> Result<()> {
    if geohash.is_empty() {
        return Err(GeoScanError::invalid("Geohash must not be empty"));
    }

    if let Some((idx, c)) = geohash
        .chars()
        .enumerate()
        .find(|(_, c)| alphabet_index(*c).is_none())
    {
        return Err(GeoScanError::invalid(format!(
            "Geohash {:?} has invalid character {:?} at index {}",
            geohash, c, idx
        )));
    }

    Ok(())
}

/// Converts a raw numeric precision (as read from JSON or another loosely
/// typed source) into a character count.
///
/// Rejects NaN, infinities, fractional values, values `<= 0` and values
/// above 22.
///
/// # Examples
///
/// ```
/// use geoscan::compute::validation::validate_precision_value;
///
/// assert_eq!(validate_precision_value(10.0).unwrap(), 10);
/// assert!(validate_precision_value(1.5).is_err());
/// assert!(validate_precision_value(f64::NAN).is_err());
/// assert!(validate_precision_value(23.0).is_err());
/// ```
pub fn validate_precision_value(precision: f64) -> Result<usize> {
    if !precision.is_finite() || precision.fract() != 0.0 {
        return Err(GeoScanError::invalid(format!(
            "Precision must be an integer, got: {}",
            precision
        )));
    }

    if precision < 1.0 || precision > MAX_PRECISION as f64 {
        return Err(GeoScanError::invalid(format!(
            "Precision must be in [1, {}], got: {}",
            MAX_PRECISION, precision
        )));
    }

    Ok(precision as usize)
}
