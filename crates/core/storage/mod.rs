//! Storage backend abstraction for geoscan
//!
//! Backends only need to answer ordered range scans over a geohash field.
//! That is the one capability proximity queries rely on, so anything from a
//! `BTreeMap` to a hosted document store can sit behind this trait.

use crate::error::Result;
use bytes::Bytes;
use geoscan_types::geo::Coordinate;
use geoscan_types::range::QueryRange;

mod memory;

pub use memory::MemoryBackend;

/// A stored location record.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub key: String,
    /// Geohash of `coordinate`, the field range scans run over
    pub geohash: String,
    pub coordinate: Coordinate,
    pub data: Bytes,
}

/// Trait for storage backend implementations
pub trait RangeBackend: Send + Sync {
    /// Insert or replace the record for `location.key`, returning the old one
    fn put(&mut self, location: Location) -> Result<Option<Location>>;

    /// Get a record by key
    fn get(&self, key: &str) -> Result<Option<Location>>;

    /// Delete a key and return the old record if it existed
    fn delete(&mut self, key: &str) -> Result<Option<Location>>;

    /// All records whose geohash lies in `[range.start, range.end)`, in
    /// geohash order.
    fn scan_range(&self, range: &QueryRange) -> Result<Vec<Location>>;

    /// Get the total number of records
    fn len(&self) -> Result<usize>;

    /// Check if the storage is empty
    fn is_empty(&self) -> Result<bool>;

    /// Get storage statistics
    fn stats(&self) -> Result<StorageStats>;
}

/// Storage backend statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Total number of keys
    pub key_count: usize,
    /// Number of write operations performed
    pub operations_count: u64,
}
