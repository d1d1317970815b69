//! Fixed time-to-live cache for fetched data

use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Entries kept per cache before the least recently used one is evicted
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
struct Entry<T> {
    value: T,
    fetched_at: DateTime<Utc>,
}

/// Values keyed by request, each valid for a fixed TTL after it was fetched
///
/// Holds at most `capacity` entries; inserting past that evicts the least
/// recently used one. Cloning shares the underlying entries.
#[derive(Clone, Debug)]
pub struct QueryCache<T> {
    ttl: chrono::Duration,
    entries: Arc<Mutex<LruCache<String, Entry<T>>>>,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500)),
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    /// Fresh value for `key` as of `now`; a stale entry is dropped
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if now.signed_duration_since(entry.fetched_at) < self.ttl {
            return Some(entry.value.clone());
        }
        entries.pop(key);
        None
    }

    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.insert_at(key, value, Utc::now());
    }

    /// Store `value` as if it had been fetched at `fetched_at`
    pub fn insert_at(&self, key: impl Into<String>, value: T, fetched_at: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(key.into(), Entry { value, fetched_at });
    }

    pub fn invalidate(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.pop(key);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_value_is_returned() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.insert("stats", 42);
        assert_eq!(cache.get("stats"), Some(42));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn test_value_expires_after_ttl() {
        let cache = QueryCache::new(Duration::from_secs(300));
        let fetched_at = Utc::now() - chrono::Duration::seconds(301);
        cache.insert_at("stats", 42, fetched_at);

        assert_eq!(
            cache.get_at("stats", fetched_at + chrono::Duration::seconds(299)),
            Some(42)
        );
        assert_eq!(cache.get("stats"), None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let shared = cache.clone();
        cache.insert("a", 1);
        cache.insert("b", 2);

        shared.invalidate("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));

        shared.clear();
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_least_recently_used_entry_is_evicted() {
        let cache = QueryCache::with_capacity(Duration::from_secs(60), 2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        assert_eq!(cache.get("a"), Some(1));

        cache.insert("c", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_stale_entry_is_dropped_on_read() {
        let cache = QueryCache::new(Duration::from_secs(300));
        cache.insert_at("stats", 42, Utc::now() - chrono::Duration::seconds(301));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get("stats"), None);
        assert!(cache.is_empty());
    }
}
