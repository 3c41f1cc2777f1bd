//! # geoscan-types
//!
//! Value types shared by the geoscan query planner and its consumers:
//!
//! - **Coordinates**: `Coordinate` (latitude-first, degrees)
//! - **Query ranges**: `QueryRange`, `QuerySet`
//! - **Distance metrics**: `DistanceMetric`
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use geoscan_types::geo::Coordinate;
//! use geoscan_types::range::{QueryRange, QuerySet};
//!
//! let sf = Coordinate::new(37.7749, -122.4194);
//! assert!(sf.is_valid());
//!
//! let mut set = QuerySet::new();
//! set.push_unique(QueryRange::new("9q8y", "9q8z"));
//! set.push_unique(QueryRange::new("9q8y", "9q8z"));
//! assert_eq!(set.len(), 1);
//! ```

pub mod geo;
pub mod range;
