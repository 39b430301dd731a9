//! Concurrent string-keyed multimap.
//!
//! Maps a (optionally case-folded) string key to a set of values. Every
//! mutation is a single atomic step on the backing [`DashMap`] shard:
//! creating the set and inserting into it happen under one entry lock, and
//! removing the last value deletes the key under that same lock. A `put`
//! racing a `remove` that empties the set therefore either lands in the
//! live set before the removal decides, or recreates the set afterwards.
//! It is never lost.

use dashmap::DashMap;
use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::hash::Hash;

/// How keys are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Keys are folded to lowercase before every access.
    Insensitive,
    /// Keys are used as given.
    Sensitive,
}

/// Normalizes a key for the given case policy.
///
/// ```
/// use vortex_cache::cache::multimap::{KeyCase, normalize_key};
///
/// assert_eq!(normalize_key("SomeKey", KeyCase::Insensitive), "somekey");
/// assert_eq!(normalize_key("SomeKey", KeyCase::Sensitive), "SomeKey");
/// ```
pub fn normalize_key(key: &str, case: KeyCase) -> Cow<'_, str> {
    match case {
        KeyCase::Sensitive => Cow::Borrowed(key),
        KeyCase::Insensitive if key.chars().any(char::is_uppercase) => {
            Cow::Owned(key.to_lowercase())
        },
        KeyCase::Insensitive => Cow::Borrowed(key),
    }
}

/// Thread-safe multimap with automatic removal of empty keys.
///
/// [`get`](Self::get) hands out a snapshot of the value set. Callers can't
/// reach the live set, so all mutation goes through [`put`](Self::put) and
/// [`remove`](Self::remove) and empty sets never linger.
///
/// # Example
///
/// ```
/// use vortex_cache::cache::ConcurrentMultimap;
///
/// let multimap = ConcurrentMultimap::case_insensitive();
/// assert!(multimap.put("SomeKey", "v1".to_string()));
/// assert!(multimap.get("SOMEKEY").contains("v1"));
///
/// assert!(multimap.remove("somekey", "v1"));
/// assert!(!multimap.contains_key("SomeKey"));
/// ```
#[derive(Debug)]
pub struct ConcurrentMultimap<V> {
    inner: DashMap<String, HashSet<V>>,
    case: KeyCase,
}

impl<V> ConcurrentMultimap<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new(case: KeyCase) -> Self {
        Self {
            inner: DashMap::new(),
            case,
        }
    }

    /// Multimap whose keys match regardless of case.
    pub fn case_insensitive() -> Self {
        Self::new(KeyCase::Insensitive)
    }

    /// Multimap whose keys match exactly.
    pub fn case_sensitive() -> Self {
        Self::new(KeyCase::Sensitive)
    }

    pub fn key_case(&self) -> KeyCase {
        self.case
    }

    fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        normalize_key(key, self.case)
    }

    /// Adds `value` under `key`. Returns false if it was already present.
    pub fn put(&self, key: &str, value: V) -> bool {
        self.inner
            .entry(self.normalize(key).into_owned())
            .or_default()
            .insert(value)
    }

    /// Like [`put`](Self::put), running `while_held` before the entry lock
    /// for `key` is released. Removals of `key` wait until it returns.
    ///
    /// `while_held` must not touch this multimap.
    pub fn put_locked<F>(&self, key: &str, value: V, while_held: F) -> bool
    where
        F: FnOnce(),
    {
        let mut set = self.inner.entry(self.normalize(key).into_owned()).or_default();
        let added = set.insert(value);
        while_held();
        added
    }

    /// Removes `value` from `key`, deleting the key once its set is empty.
    /// Returns whether a value was removed.
    pub fn remove<Q>(&self, key: &str, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut removed = false;
        self.inner
            .remove_if_mut(&*self.normalize(key), |_, set| {
                removed = set.remove(value);
                set.is_empty()
            });
        removed
    }

    /// Removes `key` with all its values, returning them.
    pub fn remove_all(&self, key: &str) -> HashSet<V> {
        self.inner
            .remove(&*self.normalize(key))
            .map(|(_, set)| set)
            .unwrap_or_default()
    }

    /// Snapshot of the values under `key`, empty if absent.
    pub fn get(&self, key: &str) -> HashSet<V> {
        self.inner
            .get(&*self.normalize(key))
            .map(|set| set.clone())
            .unwrap_or_default()
    }

    /// True iff `key` maps to at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner
            .get(&*self.normalize(key))
            .is_some_and(|set| !set.is_empty())
    }

    /// True iff `value` is stored under `key`.
    pub fn contains_entry<Q>(&self, key: &str, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner
            .get(&*self.normalize(key))
            .is_some_and(|set| set.contains(value))
    }

    /// Total number of values across all keys.
    ///
    /// Best-effort under concurrent mutation: shards are visited one at a
    /// time, so the sum is not a point-in-time count.
    pub fn size(&self) -> usize {
        self.inner.iter().map(|entry| entry.value().len()).sum()
    }

    /// Number of keys currently mapped.
    pub fn key_count(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes every key.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl<V> Default for ConcurrentMultimap<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::case_insensitive()
    }
}
