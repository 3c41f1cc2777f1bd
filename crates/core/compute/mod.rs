//! Geohash encoding, resolution math, bounding boxes, query planning,
//! validation and distances.

pub mod bbox;
pub mod distance;
pub mod geohash;
pub mod queries;
pub mod resolution;
pub mod validation;

pub use bbox::{bounding_box_bits, bounding_box_coordinates, spans_all_longitudes, wrap_longitude};
pub use distance::distance_between;
pub use geohash::{BASE32, MAX_PRECISION, alphabet_index, encode, encode_with_default};
pub use queries::{geohash_queries, geohash_query, query_bits};
