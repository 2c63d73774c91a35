//! Lazy-populating lookup cache.
//!
//! Wraps a [`RecordSource`] and memoizes successful lookups by key. The
//! source is consulted only on a miss; once a key resolves, the stored
//! record is returned for every later lookup without touching the source
//! again. "Not found" answers are never cached, so a source that starts
//! returning a record for a previously unknown key is picked up on the
//! next lookup.
//!
//! No eviction, no expiry, no persistence. Single-threaded: `get` takes
//! `&mut self` and there is no interior locking.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;

/// A backing service that can resolve records by key.
///
/// `Ok(None)` means the source was reachable but has no record for the key.
/// `Err` means the source itself failed; [`LookupCache`] passes such faults
/// through to the caller unchanged and caches nothing.
pub trait RecordSource {
    type Record;

    /// Attempt to resolve `key` to a record.
    fn try_find(&self, key: &str) -> Result<Option<Self::Record>>;
}

/// Memoizing cache in front of a [`RecordSource`].
///
/// Owns its mapping; construct one instance per source you want to front.
pub struct LookupCache<S: RecordSource> {
    records: HashMap<String, S::Record>,
    source: S,
    hits: u64,
    misses: u64,
}

impl<S: RecordSource> LookupCache<S>
where
    S::Record: Clone,
{
    /// Create an empty cache fronting `source`.
    pub fn new(source: S) -> Self {
        Self {
            records: HashMap::new(),
            source,
            hits: 0,
            misses: 0,
        }
    }

    /// Resolve `key`, consulting the source only on a miss.
    ///
    /// On a successful source lookup the record is stored and returned;
    /// from then on the stored record is served without another source
    /// call. `Ok(None)` from the source is returned as-is and leaves the
    /// mapping untouched, so the next `get` for the same key retries.
    pub fn get(&mut self, key: &str) -> Result<Option<S::Record>> {
        if let Some(record) = self.records.get(key) {
            self.hits += 1;
            debug!(key, "Lookup served from cache");
            return Ok(Some(record.clone()));
        }
        self.misses += 1;
        match self.source.try_find(key)? {
            Some(record) => {
                debug!(key, "Lookup resolved by source, caching");
                self.records.insert(key.to_string(), record.clone());
                Ok(Some(record))
            }
            None => {
                debug!(key, "Lookup not found, nothing cached");
                Ok(None)
            }
        }
    }

    /// Whether `key` is currently cached. Does not touch the source.
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if no records are cached.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.records.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// Observational cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Records currently cached.
    pub entries: usize,
    /// Lookups served without a source call.
    pub hits: u64,
    /// Lookups that went to the source (found or not).
    pub misses: u64,
}
