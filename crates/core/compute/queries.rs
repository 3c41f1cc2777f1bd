//! Proximity query planning.
//!
//! Turns a center and radius into a small set of `[start, end)` geohash
//! ranges. Every point within the radius has a geohash inside at least one
//! range; points near the edge of the box may also match, so consumers are
//! expected to post-filter candidates by exact distance.

use super::bbox::{bounding_box_bits, bounding_box_coordinates};
use super::geohash::{BITS_PER_CHAR, MAX_BITS, alphabet_char, alphabet_index, encode};
use super::validation::{validate_geohash, validate_location, validate_radius};
use crate::error::{GeoScanError, Result};
use geoscan_types::geo::Coordinate;
use geoscan_types::range::{QueryRange, QuerySet, RANGE_SENTINEL};

/// Number of interleaved bits a radius query around `center` is planned at.
/// Always at least 1.
pub fn query_bits(center: &Coordinate, radius: f64) -> u32 {
    bounding_box_bits(center, radius).max(1) as u32
}

/// Characters needed to hold `bits` bits.
#[inline]
fn precision_for_bits(bits: u32) -> usize {
    bits.div_ceil(BITS_PER_CHAR) as usize
}

/// Expands `geohash` into the range of all hashes sharing its first `bits`
/// bits.
///
/// # Examples
///
/// ```
/// use geoscan::compute::queries::geohash_query;
///
/// // 12 bits: two full characters plus the top two bits of the third.
/// let range = geohash_query("9q8yy", 12)?;
/// assert_eq!(range.start, "9q8");
/// assert_eq!(range.end, "9qh");
///
/// // A whole character: the upper bound overflows the alphabet.
/// let range = geohash_query("9qz", 15)?;
/// assert_eq!(range.start, "9qz");
/// assert_eq!(range.end, "9q~");
/// # Ok::<(), geoscan::GeoScanError>(())
/// ```
pub fn geohash_query(geohash: &str, bits: u32) -> Result<QueryRange> {
    validate_geohash(geohash)?;
    if bits == 0 || bits > MAX_BITS {
        return Err(GeoScanError::invalid(format!(
            "Query bits must be in [1, {}], got: {}",
            MAX_BITS, bits
        )));
    }

    let precision = precision_for_bits(bits);
    if geohash.len() < precision {
        log::warn!(
            "Geohash {:?} shorter than {} characters needed for {} bits, using open range",
            geohash,
            precision,
            bits
        );
        return Ok(QueryRange::new(
            geohash,
            format!("{}{}", geohash, RANGE_SENTINEL),
        ));
    }

    // Validated as ASCII above, so byte slicing is on char boundaries.
    let base = &geohash[..precision - 1];
    let last = geohash[precision - 1..precision]
        .chars()
        .next()
        .and_then(alphabet_index)
        .ok_or_else(|| GeoScanError::invalid(format!("Malformed geohash {:?}", geohash)))?;

    let significant_bits = bits - base.len() as u32 * BITS_PER_CHAR;
    let unused_bits = BITS_PER_CHAR - significant_bits;

    let start_value = (last >> unused_bits) << unused_bits;
    let end_value = start_value + (1 << unused_bits);

    let start = format!("{}{}", base, alphabet_char(start_value));
    let end = if end_value > 31 {
        format!("{}{}", base, RANGE_SENTINEL)
    } else {
        format!("{}{}", base, alphabet_char(end_value))
    };

    Ok(QueryRange { start, end })
}

/// Plans the geohash ranges covering a circle of `radius` meters around
/// `center`.
///
/// Returns at most nine ranges, in bounding-box order, with duplicates
/// removed.
///
/// # Examples
///
/// ```
/// use geoscan::{Coordinate, geohash_queries};
///
/// let sf = Coordinate::new(37.7749, -122.4194);
/// let ranges = geohash_queries(&sf, 1000.0)?;
///
/// assert!(!ranges.is_empty() && ranges.len() <= 9);
/// for range in &ranges {
///     assert!(range.start < range.end);
/// }
/// # Ok::<(), geoscan::GeoScanError>(())
/// ```
pub fn geohash_queries(center: &Coordinate, radius: f64) -> Result<QuerySet> {
    validate_location(center)?;
    validate_radius(radius)?;

    let bits = query_bits(center, radius);
    let precision = precision_for_bits(bits);

    let mut queries = QuerySet::new();
    for coordinate in bounding_box_coordinates(center, radius) {
        let hash = encode(&coordinate, precision)?;
        let range = geohash_query(&hash, bits)?;
        log::trace!("{} -> {} -> {}", coordinate, hash, range);
        queries.push_unique(range);
    }

    log::debug!(
        "Planned {} range(s) for radius {}m around {} at {} bits ({} chars)",
        queries.len(),
        radius,
        center,
        bits,
        precision
    );

    Ok(queries)
}
