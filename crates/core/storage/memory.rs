//! In-memory storage backend implementation.

use super::{Location, RangeBackend, StorageStats};
use crate::error::Result;
use geoscan_types::range::QueryRange;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory storage backend ordered by `(geohash, key)`
pub struct MemoryBackend {
    index: BTreeMap<(String, String), Location>,
    /// key -> geohash, to find the index entry on replace/delete
    keys: FxHashMap<String, String>,
    stats: StorageStats,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
            keys: FxHashMap::default(),
            stats: StorageStats::default(),
        }
    }

    /// Create with initial capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        let mut backend = Self::new();
        backend.keys.reserve(capacity);
        backend
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeBackend for MemoryBackend {
    fn put(&mut self, location: Location) -> Result<Option<Location>> {
        let old = match self.keys.insert(location.key.clone(), location.geohash.clone()) {
            Some(old_hash) => self.index.remove(&(old_hash, location.key.clone())),
            None => {
                self.stats.key_count += 1;
                None
            }
        };

        self.index
            .insert((location.geohash.clone(), location.key.clone()), location);
        self.stats.operations_count += 1;

        Ok(old)
    }

    fn get(&self, key: &str) -> Result<Option<Location>> {
        Ok(self
            .keys
            .get(key)
            .and_then(|hash| self.index.get(&(hash.clone(), key.to_string())))
            .cloned())
    }

    fn delete(&mut self, key: &str) -> Result<Option<Location>> {
        let old = self
            .keys
            .remove(key)
            .and_then(|hash| self.index.remove(&(hash, key.to_string())));

        if old.is_some() {
            self.stats.key_count = self.stats.key_count.saturating_sub(1);
        }
        self.stats.operations_count += 1;

        Ok(old)
    }

    fn scan_range(&self, range: &QueryRange) -> Result<Vec<Location>> {
        if range.start >= range.end {
            return Ok(Vec::new());
        }

        // The empty key sorts first, so these bounds select exactly the
        // geohashes in [start, end) regardless of key.
        let lower = Bound::Included((range.start.clone(), String::new()));
        let upper = Bound::Excluded((range.end.clone(), String::new()));

        Ok(self
            .index
            .range((lower, upper))
            .map(|(_, location)| location.clone())
            .collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.keys.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.keys.is_empty())
    }

    fn stats(&self) -> Result<StorageStats> {
        Ok(self.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use geoscan_types::geo::Coordinate;

    fn location(key: &str, geohash: &str) -> Location {
        Location {
            key: key.to_string(),
            geohash: geohash.to_string(),
            coordinate: Coordinate::new(0.0, 0.0),
            data: Bytes::from(format!("data:{}", key)),
        }
    }

    #[test]
    fn test_memory_backend_basic_ops() {
        let mut backend = MemoryBackend::new();

        assert!(backend.put(location("a", "9q8yy")).unwrap().is_none());
        let retrieved = backend.get("a").unwrap().unwrap();
        assert_eq!(retrieved.geohash, "9q8yy");
        assert!(backend.get("missing").unwrap().is_none());

        let deleted = backend.delete("a").unwrap().unwrap();
        assert_eq!(deleted.key, "a");
        assert!(backend.get("a").unwrap().is_none());
        assert!(backend.is_empty().unwrap());
    }

    #[test]
    fn test_put_replaces_previous_location() {
        let mut backend = MemoryBackend::new();
        backend.put(location("a", "9q8yy")).unwrap();
        let old = backend.put(location("a", "dr5re")).unwrap().unwrap();
        assert_eq!(old.geohash, "9q8yy");

        assert_eq!(backend.len().unwrap(), 1);
        let everything = QueryRange::new("0", "~");
        let all = backend.scan_range(&everything).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].geohash, "dr5re");
    }

    #[test]
    fn test_scan_range_is_half_open() {
        let mut backend = MemoryBackend::new();
        backend.put(location("below", "9q8x")).unwrap();
        backend.put(location("start", "9q8y")).unwrap();
        backend.put(location("inside", "9q8yzzz")).unwrap();
        backend.put(location("end", "9q8z")).unwrap();
        backend.put(location("after", "9q8z0")).unwrap();

        let found: Vec<String> = backend
            .scan_range(&QueryRange::new("9q8y", "9q8z"))
            .unwrap()
            .into_iter()
            .map(|l| l.key)
            .collect();
        assert_eq!(found, vec!["start", "inside"]);
    }

    #[test]
    fn test_scan_range_sentinel() {
        let mut backend = MemoryBackend::new();
        backend.put(location("a", "9qh0")).unwrap();
        backend.put(location("b", "9qzzzz")).unwrap();
        backend.put(location("c", "9r00")).unwrap();

        let found = backend.scan_range(&QueryRange::new("9qh", "9q~")).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_scan_inverted_range_is_empty() {
        let mut backend = MemoryBackend::new();
        backend.put(location("a", "9q8y")).unwrap();
        assert!(backend.scan_range(&QueryRange::new("9q9", "9q8")).unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let mut backend = MemoryBackend::with_capacity(4);
        backend.put(location("a", "u4pr")).unwrap();
        backend.put(location("b", "u4ps")).unwrap();
        backend.put(location("a", "u4pt")).unwrap();
        backend.delete("b").unwrap();
        backend.delete("nope").unwrap();

        let stats = backend.stats().unwrap();
        assert_eq!(stats.key_count, 1);
        assert_eq!(stats.operations_count, 5);
        assert_eq!(backend.len().unwrap(), 1);
    }
}
