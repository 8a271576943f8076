//! Small caller-owned LRU cache with optional time-to-live
//!
//! Capacities here are tiny (a handful of list snapshots per session), so
//! entries live in a `Vec` kept in most-recently-used order.

use std::time::{Duration, Instant};

use crate::config::CacheConfig;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
pub struct BoundedCache<K, V> {
    max_entries: usize,
    ttl: Option<Duration>,
    entries: Vec<Entry<K, V>>,
}

impl<K: Eq, V> BoundedCache<K, V> {
    /// A `max_entries` of zero is treated as one.
    pub fn new(config: CacheConfig) -> Self {
        let max_entries = config.max_entries.max(1);
        Self {
            max_entries,
            ttl: config.ttl,
            entries: Vec::with_capacity(max_entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &Entry<K, V>, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.inserted_at) > ttl)
    }

    /// Look up `key`, promoting it to most recently used. Expired entries
    /// are dropped and reported as misses.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&mut self, key: &K, now: Instant) -> Option<&V> {
        let pos = self.entries.iter().position(|e| &e.key == key)?;
        if self.is_expired(&self.entries[pos], now) {
            self.entries.remove(pos);
            return None;
        }
        if pos != 0 {
            let entry = self.entries.remove(pos);
            self.entries.insert(0, entry);
        }
        self.entries.first().map(|e| &e.value)
    }

    /// Insert or replace `key`, returning the previous value if any.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.put_at(key, value, Instant::now())
    }

    fn put_at(&mut self, key: K, value: V, now: Instant) -> Option<V> {
        let mut old_value = None;
        if let Some(pos) = self.entries.iter().position(|e| e.key == key) {
            old_value = Some(self.entries.remove(pos).value);
        } else if self.entries.len() >= self.max_entries {
            self.entries.pop();
        }
        self.entries.insert(
            0,
            Entry {
                key,
                value,
                inserted_at: now,
            },
        );
        old_value
    }

    /// Drop the entry for `key`, if present.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        let pos = self.entries.iter().position(|e| &e.key == key)?;
        Some(self.entries.remove(pos).value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(max_entries: usize, ttl: Option<Duration>) -> BoundedCache<&'static str, i32> {
        BoundedCache::new(CacheConfig { max_entries, ttl })
    }

    #[test]
    fn put_then_get_hits() {
        let mut cache = cache(2, None);
        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_existing_key_returns_old_value() {
        let mut cache = cache(2, None);
        cache.put("a", 1);
        assert_eq!(cache.put("a", 9), Some(1));
        assert_eq!(cache.get(&"a"), Some(&9));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = cache(2, None);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.put("c", 3);
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn zero_capacity_behaves_as_one() {
        let mut cache = cache(0, None);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"b"), Some(&2));
    }

    #[test]
    fn expired_entries_are_misses() {
        let mut cache = cache(4, Some(Duration::from_secs(10)));
        let start = Instant::now();
        cache.put_at("a", 1, start);
        assert_eq!(cache.get_at(&"a", start + Duration::from_secs(5)), Some(&1));
        assert_eq!(cache.get_at(&"a", start + Duration::from_secs(11)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_removes_entry() {
        let mut cache = cache(2, None);
        cache.put("a", 1);
        assert_eq!(cache.invalidate(&"a"), Some(1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.invalidate(&"a"), None);
    }
}
