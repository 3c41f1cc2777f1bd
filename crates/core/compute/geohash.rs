//! Base-32 geohash encoding.
//!
//! Each character carries 5 bits. Bits alternate between longitude and
//! latitude, longitude first, each one halving the current interval of its
//! axis. A shorter hash is always a prefix of a longer hash for the same
//! coordinate, which is what makes lexicographic range scans work.

use crate::error::{GeoScanError, Result};
use geoscan_types::geo::Coordinate;

/// Geohash alphabet (base-32 without `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

pub const BITS_PER_CHAR: u32 = 5;

/// Longest supported hash, in characters.
pub const MAX_PRECISION: usize = 22;

/// `MAX_PRECISION * BITS_PER_CHAR`
pub const MAX_BITS: u32 = 110;

/// Hash length used when the caller does not pick one.
pub const DEFAULT_PRECISION: usize = 10;

/// Which interval the next bit refines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Axis::Longitude => Axis::Latitude,
            Axis::Latitude => Axis::Longitude,
        }
    }
}

/// Position of `c` in [`BASE32`], if it belongs to the alphabet.
///
/// # Examples
///
/// ```
/// use geoscan::compute::geohash::{alphabet_index, BASE32};
///
/// assert_eq!(alphabet_index('0'), Some(0));
/// assert_eq!(alphabet_index('z'), Some(31));
/// assert_eq!(alphabet_index('a'), None);
/// assert_eq!(BASE32[alphabet_index('q').unwrap()], b'q');
/// ```
pub fn alphabet_index(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    let byte = c as u8;
    BASE32.iter().position(|&b| b == byte)
}

/// Alphabet character for a 5-bit value. `value` must be `< 32`.
#[inline]
pub(crate) fn alphabet_char(value: usize) -> char {
    BASE32[value] as char
}

/// Encode `coordinate` as a geohash of `precision` characters.
///
/// Fails with [`GeoScanError::InvalidArgument`] unless `1 <= precision <= 22`.
///
/// # Examples
///
/// ```
/// use geoscan::compute::geohash::encode;
/// use geoscan::Coordinate;
///
/// let hash = encode(&Coordinate::new(57.64911, 10.40744), 11)?;
/// assert_eq!(hash, "u4pruydqqvj");
///
/// assert!(encode(&Coordinate::new(0.0, 0.0), 0).is_err());
/// assert!(encode(&Coordinate::new(0.0, 0.0), 23).is_err());
/// # Ok::<(), geoscan::GeoScanError>(())
/// ```
pub fn encode(coordinate: &Coordinate, precision: usize) -> Result<String> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeoScanError::invalid(format!(
            "Precision must be an integer in [1, {}], got: {}",
            MAX_PRECISION, precision
        )));
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut axis = Axis::Longitude;

    let mut hash = String::with_capacity(precision);
    let mut value = 0usize;
    let mut bits = 0u32;

    while hash.len() < precision {
        let (coord, range) = match axis {
            Axis::Longitude => (coordinate.longitude, &mut lon_range),
            Axis::Latitude => (coordinate.latitude, &mut lat_range),
        };

        let mid = (range.0 + range.1) / 2.0;
        if coord > mid {
            value = (value << 1) | 1;
            range.0 = mid;
        } else {
            value <<= 1;
            range.1 = mid;
        }

        axis = axis.flip();
        bits += 1;

        if bits == BITS_PER_CHAR {
            hash.push(alphabet_char(value));
            value = 0;
            bits = 0;
        }
    }

    Ok(hash)
}

/// Encode at [`DEFAULT_PRECISION`].
pub fn encode_with_default(coordinate: &Coordinate) -> Result<String> {
    encode(coordinate, DEFAULT_PRECISION)
}
