//! Bounding box sampling for radius queries.
//!
//! A circle is approximated by the nine points of its enclosing lat/lon box:
//! the center, the east/west edges, and the three points along each of the
//! north and south edges.

use super::geohash::MAX_BITS;
use super::resolution::{
    latitude_bits_for_resolution, longitude_bits_for_resolution, meters_to_longitude_degrees,
};
use geoscan_types::geo::Coordinate;

/// Approximate length of one degree of latitude, meters.
pub const METERS_PER_DEGREE_LATITUDE: f64 = 110_574.0;

/// North and south edges of the box, clamped to the poles.
fn latitude_band(center_latitude: f64, radius: f64) -> (f64, f64) {
    let lat_delta = radius / METERS_PER_DEGREE_LATITUDE;
    let north = (center_latitude + lat_delta).min(90.0);
    let south = (center_latitude - lat_delta).max(-90.0);
    (north, south)
}

/// East/west half-width of the box in degrees, taken at whichever edge is
/// closer to a pole.
fn longitude_delta(north: f64, south: f64, radius: f64) -> f64 {
    meters_to_longitude_degrees(radius, north).max(meters_to_longitude_degrees(radius, south))
}

/// Wraps a longitude into [-180, 180].
///
/// # Examples
///
/// ```
/// use geoscan::compute::bbox::wrap_longitude;
///
/// assert_eq!(wrap_longitude(170.0), 170.0);
/// assert_eq!(wrap_longitude(190.0), -170.0);
/// assert_eq!(wrap_longitude(-190.0), 170.0);
/// ```
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let adjusted = longitude + 180.0;
    if adjusted > 0.0 {
        (adjusted % 360.0) - 180.0
    } else {
        180.0 - (-adjusted % 360.0)
    }
}

/// Nine coordinates sampling the bounding box of a circle of `radius` meters
/// around `center`.
///
/// Order: center, center west, center east, north, north west, north east,
/// south, south west, south east. The east/west offset is the wider of the
/// north and south bands so the box is never too narrow.
pub fn bounding_box_coordinates(center: &Coordinate, radius: f64) -> [Coordinate; 9] {
    let (north, south) = latitude_band(center.latitude, radius);
    let lon_delta = longitude_delta(north, south, radius);

    let lon = center.longitude;
    let west = wrap_longitude(lon - lon_delta);
    let east = wrap_longitude(lon + lon_delta);

    [
        Coordinate::new(center.latitude, lon),
        Coordinate::new(center.latitude, west),
        Coordinate::new(center.latitude, east),
        Coordinate::new(north, lon),
        Coordinate::new(north, west),
        Coordinate::new(north, east),
        Coordinate::new(south, lon),
        Coordinate::new(south, west),
        Coordinate::new(south, east),
    ]
}

/// Whether the box around `center` wraps every longitude: it reaches a pole
/// or is at least 360 degrees wide.
///
/// The nine sample points of such a box collapse onto the center meridian,
/// so they do not identify the cells the circle touches.
///
/// # Examples
///
/// ```
/// use geoscan::Coordinate;
/// use geoscan::compute::bbox::spans_all_longitudes;
///
/// assert!(spans_all_longitudes(&Coordinate::new(90.0, 0.0), 1_000.0));
/// assert!(spans_all_longitudes(&Coordinate::new(0.0, 0.0), 30_000_000.0));
/// assert!(!spans_all_longitudes(&Coordinate::new(37.7749, -122.4194), 1_000.0));
/// ```
pub fn spans_all_longitudes(center: &Coordinate, radius: f64) -> bool {
    let (north, south) = latitude_band(center.latitude, radius);
    north >= 90.0 || south <= -90.0 || longitude_delta(north, south, radius) >= 180.0
}

/// Interleaved bit budget for a query box of `size` meters around
/// `coordinate`.
///
/// Latitude and longitude bits alternate, so each axis contributes twice its
/// own count. Longitude takes one less because it occupies the first bit of
/// every pair. Can be zero or negative for planet-scale sizes.
pub fn bounding_box_bits(coordinate: &Coordinate, size: f64) -> i32 {
    let (north, south) = latitude_band(coordinate.latitude, size);

    let bits_lat = latitude_bits_for_resolution(size).floor() as i32 * 2;
    let bits_lon_north = longitude_bits_for_resolution(size, north).floor() as i32 * 2 - 1;
    let bits_lon_south = longitude_bits_for_resolution(size, south).floor() as i32 * 2 - 1;

    bits_lat
        .min(bits_lon_north)
        .min(bits_lon_south)
        .min(MAX_BITS as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_longitude_in_range_is_identity() {
        for lon in [-180.0, -90.5, 0.0, 45.25, 180.0] {
            assert_eq!(wrap_longitude(lon), lon);
        }
    }

    #[test]
    fn test_wrap_longitude_multiple_turns() {
        assert!((wrap_longitude(540.0) - (-180.0)).abs() < 1e-9);
        assert!((wrap_longitude(-530.0) - (-170.0)).abs() < 1e-9);
        assert!((wrap_longitude(181.0) - (-179.0)).abs() < 1e-9);
        assert!((wrap_longitude(-181.0) - 179.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_shape() {
        let center = Coordinate::new(37.7749, -122.4194);
        let coords = bounding_box_coordinates(&center, 1000.0);
        let lat_delta = 1000.0 / METERS_PER_DEGREE_LATITUDE;

        assert_eq!(coords[0], center);
        assert_eq!(coords[1].latitude, center.latitude);
        assert_eq!(coords[2].latitude, center.latitude);
        for c in &coords[3..6] {
            assert!((c.latitude - (center.latitude + lat_delta)).abs() < 1e-12);
        }
        for c in &coords[6..9] {
            assert!((c.latitude - (center.latitude - lat_delta)).abs() < 1e-12);
        }
        assert!(coords[1].longitude < center.longitude);
        assert!(coords[2].longitude > center.longitude);
        assert_eq!(coords[1].longitude, coords[4].longitude);
        assert_eq!(coords[2].longitude, coords[8].longitude);
    }

    #[test]
    fn test_box_uses_wider_band() {
        let center = Coordinate::new(60.0, 10.0);
        let radius = 50_000.0;
        let coords = bounding_box_coordinates(&center, radius);
        let north = center.latitude + radius / METERS_PER_DEGREE_LATITUDE;
        let expected = meters_to_longitude_degrees(radius, north);
        assert!((coords[2].longitude - (10.0 + expected)).abs() < 1e-9);
    }

    #[test]
    fn test_box_clamps_at_pole() {
        let center = Coordinate::new(89.99, 0.0);
        let coords = bounding_box_coordinates(&center, 10_000.0);
        assert_eq!(coords[3].latitude, 90.0);
        for c in &coords {
            assert!((-90.0..=90.0).contains(&c.latitude));
            assert!((-180.0..=180.0).contains(&c.longitude));
        }
    }

    #[test]
    fn test_box_wraps_antimeridian() {
        let center = Coordinate::new(0.0, 179.99);
        let coords = bounding_box_coordinates(&center, 5_000.0);
        assert!(coords[2].longitude < 0.0, "east edge should wrap to -180 side");
        assert!(coords[1].longitude > 179.0);
    }

    #[test]
    fn test_spans_all_longitudes_when_touching_a_pole() {
        assert!(spans_all_longitudes(&Coordinate::new(90.0, 0.0), 1_000.0));
        assert!(spans_all_longitudes(&Coordinate::new(89.99, 0.0), 10_000.0));
        assert!(spans_all_longitudes(&Coordinate::new(-89.99, 120.0), 10_000.0));
    }

    #[test]
    fn test_spans_all_longitudes_false_for_regular_boxes() {
        assert!(!spans_all_longitudes(&Coordinate::new(37.7749, -122.4194), 1_000.0));
        assert!(!spans_all_longitudes(&Coordinate::new(80.0, 15.0), 50_000.0));
        assert!(!spans_all_longitudes(&Coordinate::new(0.0, 179.99), 5_000.0));
    }

    #[test]
    fn test_bits_for_one_kilometer_in_san_francisco() {
        let bits = bounding_box_bits(&Coordinate::new(37.7749, -122.4194), 1000.0);
        assert_eq!(bits, 27);
    }

    #[test]
    fn test_bits_at_pole() {
        assert_eq!(bounding_box_bits(&Coordinate::new(90.0, 0.0), 1000.0), 1);
    }

    #[test]
    fn test_bits_for_one_meter_at_equator() {
        // latitude: floor(24.25) * 2 = 48, longitude: floor(25.26) * 2 - 1 = 49
        assert_eq!(bounding_box_bits(&Coordinate::new(0.0, 0.0), 1.0), 48);
    }

    #[test]
    fn test_bits_non_positive_for_huge_size() {
        assert!(bounding_box_bits(&Coordinate::new(0.0, 0.0), 50_000_000.0) <= 0);
    }
}
