//! Lexicographic geohash ranges produced by proximity query planning.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Upper-bound sentinel. Sorts after every base-32 geohash character.
pub const RANGE_SENTINEL: char = '~';

/// Maximum number of ranges a single proximity query produces.
pub const MAX_QUERY_RANGES: usize = 9;

/// A half-open `[start, end)` range over geohash strings.
///
/// Any hash that compares `>= start` and `< end` lies inside the cell the
/// range was derived from. `end` may finish with [`RANGE_SENTINEL`], meaning
/// "everything sharing the base prefix".
///
/// # Examples
///
/// ```
/// use geoscan_types::range::QueryRange;
///
/// let range = QueryRange::new("9q8y", "9q8z");
/// assert!(range.contains("9q8yyk8"));
/// assert!(!range.contains("9q8z"));
///
/// let open = QueryRange::new("9qh", "9q~");
/// assert!(open.contains("9qzzzz"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryRange {
    pub start: String,
    pub end: String,
}

impl QueryRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Bytewise `start <= hash < end`.
    #[inline]
    pub fn contains(&self, hash: &str) -> bool {
        self.start.as_str() <= hash && hash < self.end.as_str()
    }

    /// Whether the range has no finite upper bound within its base prefix.
    #[inline]
    pub fn is_open_ended(&self) -> bool {
        self.end.ends_with(RANGE_SENTINEL)
    }
}

impl std::fmt::Display for QueryRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Ordered, duplicate-free list of query ranges.
///
/// Insertion order is preserved; pushing a range equal to one already present
/// is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySet {
    ranges: SmallVec<[QueryRange; MAX_QUERY_RANGES]>,
}

impl QuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `range` unless an identical range is already present.
    /// Returns `true` if the range was added.
    pub fn push_unique(&mut self, range: QueryRange) -> bool {
        if self.ranges.contains(&range) {
            return false;
        }
        self.ranges.push(range);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryRange> {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[QueryRange] {
        &self.ranges
    }

    /// Whether any range in the set contains `hash`.
    pub fn contains_hash(&self, hash: &str) -> bool {
        self.ranges.iter().any(|range| range.contains(hash))
    }

    /// `(start, end)` pairs, in order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.ranges
            .iter()
            .map(|range| (range.start.clone(), range.end.clone()))
            .collect()
    }
}

impl FromIterator<QueryRange> for QuerySet {
    fn from_iter<I: IntoIterator<Item = QueryRange>>(iter: I) -> Self {
        let mut set = QuerySet::new();
        for range in iter {
            set.push_unique(range);
        }
        set
    }
}

impl IntoIterator for QuerySet {
    type Item = QueryRange;
    type IntoIter = smallvec::IntoIter<[QueryRange; MAX_QUERY_RANGES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuerySet {
    type Item = &'a QueryRange;
    type IntoIter = std::slice::Iter<'a, QueryRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
