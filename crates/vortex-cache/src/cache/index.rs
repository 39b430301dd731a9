//! Bidirectional index between watch keys and cache keys.

use std::collections::HashSet;

use super::multimap::{ConcurrentMultimap, KeyCase, normalize_key};

/// Tracks which cached responses depend on which watch keys.
///
/// Two multimaps kept in lock-step: `watch key -> {cache key}` (watch
/// keys case-folded) and `cache key -> {watch key}` (cache keys exact,
/// values are the folded watch keys). Each call leaves both directions
/// consistent once it returns. A reader running alongside a call may see
/// one direction updated before the other.
#[derive(Debug)]
pub struct WatchKeyIndex {
    watch_to_cache: ConcurrentMultimap<String>,
    cache_to_watch: ConcurrentMultimap<String>,
}

impl WatchKeyIndex {
    pub fn new() -> Self {
        Self {
            watch_to_cache: ConcurrentMultimap::new(KeyCase::Insensitive),
            cache_to_watch: ConcurrentMultimap::new(KeyCase::Sensitive),
        }
    }

    /// Records that `cache_key` must be evicted when `watch_key` is released.
    ///
    /// The forward row is written while the reverse entry of `cache_key` is
    /// locked, so an eviction that finds the forward row always finds the
    /// reverse one too. Lock order is reverse then forward; evictions never
    /// hold both.
    pub fn register_dependency(&self, watch_key: &str, cache_key: &str) {
        let watch_key = normalize_key(watch_key, KeyCase::Insensitive).into_owned();
        self.cache_to_watch
            .put_locked(cache_key, watch_key.clone(), || {
                self.watch_to_cache.put(&watch_key, cache_key.to_string());
            });
    }

    /// Drops every row of `cache_key`, returning the watch keys it had.
    pub fn evict_by_cache_key(&self, cache_key: &str) -> HashSet<String> {
        let watch_keys = self.cache_to_watch.remove_all(cache_key);
        for watch_key in &watch_keys {
            self.watch_to_cache.remove(watch_key, cache_key);
        }
        watch_keys
    }

    /// Drops every row of `watch_key`, returning the affected cache keys.
    ///
    /// The affected cache keys lose their rows under other watch keys as
    /// well: their responses are about to be evicted, and rows pointing at
    /// evicted responses would only accumulate.
    pub fn evict_by_watch_key(&self, watch_key: &str) -> HashSet<String> {
        let cache_keys = self.watch_to_cache.remove_all(watch_key);
        for cache_key in &cache_keys {
            self.evict_by_cache_key(cache_key);
        }
        cache_keys
    }

    /// Watch keys `cache_key` depends on, case-folded.
    pub fn watch_keys_of(&self, cache_key: &str) -> HashSet<String> {
        self.cache_to_watch.get(cache_key)
    }

    /// Cache keys depending on `watch_key`.
    pub fn cache_keys_of(&self, watch_key: &str) -> HashSet<String> {
        self.watch_to_cache.get(watch_key)
    }

    /// True iff the row is present in both directions.
    pub fn contains(&self, watch_key: &str, cache_key: &str) -> bool {
        let watch_key = normalize_key(watch_key, KeyCase::Insensitive);
        self.watch_to_cache.contains_entry(&watch_key, cache_key)
            && self.cache_to_watch.contains_entry(cache_key, &*watch_key)
    }

    /// Number of (watch key, cache key) rows. Best-effort under contention.
    pub fn row_count(&self) -> usize {
        self.watch_to_cache.size()
    }

    /// Number of distinct cache keys indexed.
    pub fn cache_key_count(&self) -> usize {
        self.cache_to_watch.key_count()
    }

    pub fn is_empty(&self) -> bool {
        self.watch_to_cache.is_empty() && self.cache_to_watch.is_empty()
    }

    /// Drops every row.
    pub fn clear(&self) {
        self.watch_to_cache.clear();
        self.cache_to_watch.clear();
    }
}

impl Default for WatchKeyIndex {
    fn default() -> Self {
        Self::new()
    }
}
