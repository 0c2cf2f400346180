//! A small read-through cache with pluggable expiry.
//!
//! Entries remember when they were stored; an [`InvalidationPolicy`] decides
//! whether an entry is still fresh, against a [`Clock`] that tests can
//! control. Stale entries are invisible to [`TtlCache::get`] and are replaced
//! wholesale by the next insert.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "now" for freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Invalidation policies
// ---------------------------------------------------------------------------

/// Decides whether an entry stored at `stored_at` may still be served.
pub trait InvalidationPolicy: Send + Sync {
    fn is_fresh(&self, stored_at: Timestamp, now: Timestamp) -> bool;
}

/// Entries expire a fixed duration after they were stored.
#[derive(Debug, Clone, Copy)]
pub struct FixedTtl {
    pub ttl: chrono::Duration,
}

impl FixedTtl {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self { ttl }
    }
}

impl InvalidationPolicy for FixedTtl {
    fn is_fresh(&self, stored_at: Timestamp, now: Timestamp) -> bool {
        now - stored_at < self.ttl
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

struct CacheEntry<V> {
    value: V,
    stored_at: Timestamp,
}

/// Key -> value map whose entries expire according to a policy.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    policy: Box<dyn InvalidationPolicy>,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(policy: impl InvalidationPolicy + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            policy: Box::new(policy),
            clock,
        }
    }

    /// The cached value, if present and still fresh.
    pub fn get(&self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|e| self.policy.is_fresh(e.stored_at, now))
            .map(|e| &e.value)
    }

    /// Store `value`, replacing any previous entry.
    pub fn insert(&mut self, key: K, value: V) {
        let stored_at = self.clock.now();
        self.entries.insert(key, CacheEntry { value, stored_at });
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn manual() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.timestamp_opt(1_000_000, 0).unwrap()))
    }

    #[test]
    fn fresh_entry_is_served() {
        let clock = manual();
        let mut cache = TtlCache::new(FixedTtl::new(Duration::minutes(10)), clock.clone());
        cache.insert("names", 1);

        clock.advance(Duration::minutes(9));
        assert_eq!(cache.get(&"names"), Some(&1));
    }

    #[test]
    fn entry_expires_at_ttl() {
        let clock = manual();
        let mut cache = TtlCache::new(FixedTtl::new(Duration::minutes(10)), clock.clone());
        cache.insert("names", 1);

        clock.advance(Duration::minutes(10));
        assert_eq!(cache.get(&"names"), None);
    }

    #[test]
    fn reinsert_restarts_the_window() {
        let clock = manual();
        let mut cache = TtlCache::new(FixedTtl::new(Duration::minutes(10)), clock.clone());
        cache.insert("names", 1);
        clock.advance(Duration::minutes(11));
        cache.insert("names", 2);
        clock.advance(Duration::minutes(5));
        assert_eq!(cache.get(&"names"), Some(&2));
    }

    #[test]
    fn invalidate_all_clears_everything() {
        let mut cache = TtlCache::new(FixedTtl::new(Duration::minutes(10)), manual());
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.invalidate_all();
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
    }
}
