//! Geohash proximity query planning for stores that only support
//! lexicographic range scans.
//!
//! ## Features
//! - **Geohash encoding**: base-32 hashes up to 22 characters (110 bits)
//! - **Query planning**: a center and radius become at most nine
//!   `[start, end)` geohash ranges that together contain every point in the circle
//! - **Resolution math**: bit budgets from meters, accounting for longitude
//!   degrees shrinking toward the poles
//! - **Reference store**: `GeoDB`, an ordered in-memory store that runs the
//!   range scans and post-filters by exact distance
//!
//! ## Over-approximation
//! Ranges cover whole geohash cells, so scans also return some points just
//! outside the circle. Consumers filter candidates by exact distance;
//! `GeoDB::query_within_radius` does this for you.
//!
//! ```rust
//! use geoscan::{Coordinate, geohash_queries};
//!
//! let center = Coordinate::new(37.7749, -122.4194);
//! for range in &geohash_queries(&center, 1000.0)? {
//!     // issue: field >= range.start AND field < range.end
//!     assert!(range.start < range.end);
//! }
//! # Ok::<(), geoscan::GeoScanError>(())
//! ```

pub mod compute;
pub mod config;
pub mod db;
pub mod error;
pub mod storage;

pub use config::Config;
pub use db::GeoDB;
pub use error::{GeoScanError, Result};

pub use geoscan_types::geo::{Coordinate, DistanceMetric};
pub use geoscan_types::range::{QueryRange, QuerySet};

pub use compute::{
    bounding_box_bits, bounding_box_coordinates, distance_between, encode, geohash_queries,
    geohash_query, query_bits, spans_all_longitudes, wrap_longitude,
};

pub use storage::{Location, MemoryBackend, RangeBackend, StorageStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GeoDB, GeoScanError, Result};

    pub use crate::{Coordinate, DistanceMetric, QueryRange, QuerySet};

    pub use crate::{encode, geohash_queries};

    pub use crate::{Location, MemoryBackend, RangeBackend};
}
