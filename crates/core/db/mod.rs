//! Location store answering radius queries through geohash range scans.
//!
//! `GeoDB` is the reference consumer of the query planner: it stores one
//! geohash per location, issues one range scan per planned `QueryRange`, and
//! post-filters candidates by exact distance.

use crate::compute::bbox::spans_all_longitudes;
use crate::compute::distance::distance_between;
use crate::compute::geohash::{BITS_PER_CHAR, encode};
use crate::compute::queries::{geohash_queries, geohash_query};
use crate::compute::validation::validate_location;
use crate::config::Config;
use crate::error::{GeoScanError, Result};
use crate::storage::{Location, MemoryBackend, RangeBackend, StorageStats};
use bytes::Bytes;
use geoscan_types::geo::Coordinate;
use geoscan_types::range::QuerySet;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Geohash-indexed location store.
///
/// Single owner; wrap in a lock to share across threads.
pub struct GeoDB<B: RangeBackend = MemoryBackend> {
    backend: B,
    config: Config,
}

impl GeoDB<MemoryBackend> {
    /// Create an in-memory store with default configuration.
    pub fn memory() -> Result<Self> {
        Self::memory_with_config(Config::default())
    }

    /// Create an in-memory store with custom configuration.
    pub fn memory_with_config(config: Config) -> Result<Self> {
        Self::with_backend(MemoryBackend::new(), config)
    }
}

impl<B: RangeBackend> GeoDB<B> {
    /// Create a store over an existing backend.
    pub fn with_backend(backend: B, config: Config) -> Result<Self> {
        config.validate().map_err(GeoScanError::InvalidArgument)?;
        Ok(Self { backend, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Insert or move `key` to `coordinate`. Returns the previous record.
    pub fn insert_location(
        &mut self,
        key: impl Into<String>,
        coordinate: &Coordinate,
        data: impl Into<Bytes>,
    ) -> Result<Option<Location>> {
        validate_location(coordinate)?;

        let geohash = encode(coordinate, self.config.precision)?;
        self.backend.put(Location {
            key: key.into(),
            geohash,
            coordinate: *coordinate,
            data: data.into(),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<Location>> {
        self.backend.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<Location>> {
        self.backend.delete(key)
    }

    pub fn len(&self) -> Result<usize> {
        self.backend.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.backend.is_empty()
    }

    pub fn stats(&self) -> Result<StorageStats> {
        self.backend.stats()
    }

    /// Ranges to scan for a radius query, fitted to the stored hash length.
    ///
    /// Very small radii can plan ranges longer than the stored geohashes.
    /// Those are widened to the enclosing cell at the stored precision,
    /// otherwise the stored (shorter) hashes would sort before the range.
    ///
    /// A box reaching a pole covers every longitude, but its sample points all
    /// sit on the center meridian, so both 1-bit halves of the keyspace are
    /// scanned instead.
    pub fn query_ranges(&self, center: &Coordinate, radius: f64) -> Result<QuerySet> {
        let planned = geohash_queries(center, radius)?;

        if spans_all_longitudes(center, radius) {
            log::debug!(
                "Query box around {} reaches a pole, scanning both hemispheres",
                center
            );
            let west = geohash_query("0", 1)?;
            let east = geohash_query("h", 1)?;
            return Ok([west, east].into_iter().collect());
        }

        let precision = self.config.precision;

        if planned.iter().all(|range| range.start.len() <= precision) {
            return Ok(planned);
        }

        log::debug!(
            "Widening {} range(s) to stored precision {}",
            planned.len(),
            precision
        );

        let max_bits = precision as u32 * BITS_PER_CHAR;
        let mut fitted = QuerySet::new();
        for range in planned {
            if range.start.len() <= precision {
                fitted.push_unique(range);
            } else {
                fitted.push_unique(geohash_query(&range.start[..precision], max_bits)?);
            }
        }
        Ok(fitted)
    }

    /// Locations within `radius` meters of `center`, nearest first.
    ///
    /// Returns `(location, distance_meters)` pairs. A `limit` of 0 means no
    /// limit.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoscan::{Coordinate, GeoDB};
    ///
    /// let mut db = GeoDB::memory()?;
    /// db.insert_location("ferry-building", &Coordinate::new(37.7955, -122.3937), "pickup")?;
    /// db.insert_location("oakland", &Coordinate::new(37.8044, -122.2712), "dropoff")?;
    ///
    /// let nearby = db.query_within_radius(&Coordinate::new(37.7749, -122.4194), 5_000.0, 0)?;
    /// assert_eq!(nearby.len(), 1);
    /// assert_eq!(nearby[0].0.key, "ferry-building");
    /// # Ok::<(), geoscan::GeoScanError>(())
    /// ```
    pub fn query_within_radius(
        &self,
        center: &Coordinate,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<(Location, f64)>> {
        let ranges = self.query_ranges(center, radius)?;
        let metric = self.config.distance_metric;

        let mut seen = FxHashSet::default();
        let mut candidates = 0usize;
        let mut results = Vec::new();

        for range in &ranges {
            for location in self.backend.scan_range(range)? {
                candidates += 1;
                if !seen.insert(location.key.clone()) {
                    continue;
                }
                let distance = distance_between(center, &location.coordinate, metric);
                if distance <= radius {
                    results.push((location, distance));
                }
            }
        }

        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        if limit > 0 {
            results.truncate(limit);
        }

        log::debug!(
            "Radius query scanned {} range(s), {} candidate(s), {} match(es)",
            ranges.len(),
            candidates,
            results.len()
        );

        Ok(results)
    }

    /// Number of locations within `radius` meters of `center`.
    pub fn count_within_radius(&self, center: &Coordinate, radius: f64) -> Result<usize> {
        Ok(self.query_within_radius(center, radius, 0)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut db = GeoDB::memory().unwrap();
        let coordinate = Coordinate::new(37.7749, -122.4194);
        assert!(db.insert_location("sf", &coordinate, "hq").unwrap().is_none());

        let location = db.get("sf").unwrap().unwrap();
        assert_eq!(location.coordinate, coordinate);
        assert_eq!(location.geohash, encode(&coordinate, 10).unwrap());
        assert!(location.geohash.starts_with("9q8yy"));
        assert_eq!(location.data, Bytes::from("hq"));
        assert_eq!(db.len().unwrap(), 1);
    }

    #[test]
    fn test_insert_rejects_invalid_location() {
        let mut db = GeoDB::memory().unwrap();
        let err = db
            .insert_location("bad", &Coordinate::new(100.0, 0.0), "x")
            .unwrap_err();
        assert!(matches!(err, GeoScanError::InvalidArgument(_)));
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            precision: 0,
            ..Config::default()
        };
        assert!(GeoDB::memory_with_config(config).is_err());
    }

    #[test]
    fn test_remove() {
        let mut db = GeoDB::memory().unwrap();
        db.insert_location("a", &Coordinate::new(1.0, 1.0), "x")
            .unwrap();
        assert!(db.remove("a").unwrap().is_some());
        assert!(db.remove("a").unwrap().is_none());
        assert_eq!(
            db.count_within_radius(&Coordinate::new(1.0, 1.0), 100.0)
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_query_ranges_match_planner_at_default_precision() {
        let db = GeoDB::memory().unwrap();
        let center = Coordinate::new(37.7749, -122.4194);
        assert_eq!(
            db.query_ranges(&center, 1000.0).unwrap(),
            geohash_queries(&center, 1000.0).unwrap()
        );
    }

    #[test]
    fn test_query_ranges_widened_for_coarse_storage() {
        let db = GeoDB::memory_with_config(Config::default().with_precision(4)).unwrap();
        let ranges = db
            .query_ranges(&Coordinate::new(37.7749, -122.4194), 1000.0)
            .unwrap();
        for range in &ranges {
            assert!(range.start.len() <= 4);
            assert!(range.end.len() <= 4);
        }
    }

    #[test]
    fn test_query_ranges_at_pole_cover_both_hemispheres() {
        let db = GeoDB::memory().unwrap();
        let expected = vec![
            ("0".to_string(), "h".to_string()),
            ("h".to_string(), "~".to_string()),
        ];
        for center in [
            Coordinate::new(90.0, 0.0),
            Coordinate::new(89.99, 0.0),
            Coordinate::new(-89.99, -45.0),
        ] {
            let ranges = db.query_ranges(&center, 10_000.0).unwrap();
            assert_eq!(ranges.to_pairs(), expected, "around {}", center);
        }
    }

    #[test]
    fn test_finds_point_on_far_side_of_pole() {
        let mut db = GeoDB::memory().unwrap();
        db.insert_location("across", &Coordinate::new(89.995, 90.0), "x")
            .unwrap();
        db.insert_location("opposite", &Coordinate::new(89.99, 180.0), "x")
            .unwrap();

        let found = db
            .query_within_radius(&Coordinate::new(90.0, 0.0), 1_000.0, 0)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.key, "across");

        let found = db
            .query_within_radius(&Coordinate::new(89.99, 0.0), 10_000.0, 0)
            .unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_limit_and_ordering() {
        let mut db = GeoDB::memory().unwrap();
        let center = Coordinate::new(40.7128, -74.0060);
        for i in 1..=5 {
            let offset = i as f64 * 0.001;
            db.insert_location(
                format!("p{}", i),
                &Coordinate::new(center.latitude + offset, center.longitude),
                "x",
            )
            .unwrap();
        }

        let all = db.query_within_radius(&center, 10_000.0, 0).unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(all[0].0.key, "p1");

        let two = db.query_within_radius(&center, 10_000.0, 2).unwrap();
        assert_eq!(two.len(), 2);
        assert_eq!(two[1].0.key, "p2");
    }
}
