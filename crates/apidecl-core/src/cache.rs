//! # Pattern Cache
//!
//! A bounded LRU keyed by `Ord` keys, used by the wire validator to keep
//! compiled string patterns between values.
//!
//! Recency is tracked with a logical clock (a monotonic counter) rather than
//! wall time, so eviction order depends only on the sequence of calls.

use regex::Regex;
use std::collections::BTreeMap;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Default number of compiled patterns kept.
pub const DEFAULT_PATTERN_CAPACITY: usize = 128;

/// Default number of entries dropped when the cache is full.
pub const DEFAULT_EVICTION_BATCH: usize = 16;

// =============================================================================
// ENTRY
// =============================================================================

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    last_used: u64,
}

// =============================================================================
// LRU CACHE
// =============================================================================

/// Least-recently-used cache with batch eviction.
#[derive(Debug, Clone)]
pub struct LruCache<K: Ord + Clone, V> {
    slots: BTreeMap<K, Slot<V>>,
    capacity: usize,
    eviction_batch: usize,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl<K: Ord + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: BTreeMap::new(),
            capacity,
            eviction_batch: DEFAULT_EVICTION_BATCH.min(capacity),
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Drop this many entries at once when the cache overflows.
    #[must_use]
    pub fn with_eviction_batch(mut self, batch: usize) -> Self {
        self.eviction_batch = batch.clamp(1, self.capacity);
        self
    }

    fn tick(&mut self) -> u64 {
        self.clock = self.clock.saturating_add(1);
        self.clock
    }

    /// Look up a key and mark it as recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.tick();
        match self.slots.get_mut(key) {
            Some(slot) => {
                slot.last_used = now;
                self.hits = self.hits.saturating_add(1);
                Some(&slot.value)
            }
            None => {
                self.misses = self.misses.saturating_add(1);
                None
            }
        }
    }

    /// Look up a key without touching recency or statistics.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.slots.get(key).map(|s| &s.value)
    }

    /// Insert or replace a value, evicting the oldest entries if full.
    pub fn insert(&mut self, key: K, value: V) {
        let now = self.tick();
        if self.slots.len() >= self.capacity && !self.slots.contains_key(&key) {
            self.evict();
        }
        self.slots.insert(
            key,
            Slot {
                value,
                last_used: now,
            },
        );
    }

    /// Return the cached value for `key`, building and caching it on a miss.
    ///
    /// A failed build neither inserts nor evicts.
    pub fn get_or_try_insert<E>(
        &mut self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        let now = self.tick();
        let value = match self.slots.remove(&key) {
            Some(slot) => {
                self.hits = self.hits.saturating_add(1);
                slot.value
            }
            None => {
                self.misses = self.misses.saturating_add(1);
                let value = build()?;
                if self.slots.len() >= self.capacity {
                    self.evict();
                }
                value
            }
        };
        Ok(&self
            .slots
            .entry(key)
            .or_insert(Slot {
                value,
                last_used: now,
            })
            .value)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let total = self.hits.saturating_add(self.misses);
        let hit_rate_percent = if total == 0 {
            0
        } else {
            u8::try_from(self.hits.saturating_mul(100) / total).unwrap_or(100)
        };
        CacheStats {
            size: self.slots.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            hit_rate_percent,
        }
    }

    fn evict(&mut self) {
        let count = self.eviction_batch.min(self.slots.len());
        let mut by_age: Vec<(u64, K)> = self
            .slots
            .iter()
            .map(|(k, s)| (s.last_used, k.clone()))
            .collect();
        by_age.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        for (_, key) in by_age.into_iter().take(count) {
            self.slots.remove(&key);
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Integer percentage, 0-100.
    pub hit_rate_percent: u8,
}

// =============================================================================
// PATTERN CACHE
// =============================================================================

/// Compiled, fully anchored string patterns keyed by their source text.
pub type PatternCache = LruCache<String, Regex>;

/// A pattern cache with the default capacity.
#[must_use]
pub fn pattern_cache() -> PatternCache {
    LruCache::new(DEFAULT_PATTERN_CAPACITY)
}

/// Compile `pattern` so that it must match the whole input.
pub fn compile_anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

// =============================================================================
// TESTS
// =============================================================================
