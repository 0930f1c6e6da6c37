//! In-process TTL cache for aggregated responses and icon assets.
//!
//! One store, two logical namespaces told apart by key prefix: aggregate
//! payloads under `agg:` and raw icon bytes under `icon:`. TTL expiry is
//! the correctness mechanism; the entry-count cap only exists as a backstop
//! so an abusive caller cannot grow the map without bound.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use bytes::Bytes;
use serde::Serialize;

use crate::aggregator::AggregateResult;
use crate::riot::region::Region;
use crate::riot_id::RiotId;

#[derive(Debug, Clone)]
pub enum CacheValue {
    Aggregate(AggregateResult),
    Icon(Bytes),
}

#[derive(Debug)]
struct CacheEntry {
    value: CacheValue,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// Read-only snapshot of the cache counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
pub struct TtlCache {
    inner: Mutex<CacheInner>,
    default_ttl: Duration,
    max_entries: usize,
}

/// Key for an aggregate entry: decoded riot id, lowercased, plus region,
/// so `Faker#KR1` and `faker%23kr1` share one entry.
pub fn aggregate_key(riot_id: &RiotId, region: Region) -> String {
    format!(
        "agg:{}:{}",
        riot_id.to_string().to_lowercase(),
        region.as_str()
    )
}

pub fn icon_key(icon_id: u32) -> String {
    format!("icon:{icon_id}")
}

impl TtlCache {
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            default_ttl,
            max_entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<CacheValue> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get(key) {
            if entry.expires_at > Instant::now() {
                inner.hits += 1;
                return Some(entry.value.clone());
            }
            inner.entries.remove(key);
        }

        inner.misses += 1;
        None
    }

    pub fn insert(&self, key: String, value: CacheValue) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    pub fn insert_with_ttl(&self, key: String, value: CacheValue, ttl: Duration) {
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            Self::evict(&mut inner, self.max_entries);
        }

        inner.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Diagnostic dump of every live key.
    pub fn keys(&self) -> Vec<String> {
        self.lock().entries.keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Backstop eviction: drop expired entries first, then the
    /// oldest-expiring live ones until there is room for one more.
    fn evict(inner: &mut CacheInner, max_entries: usize) {
        let now = Instant::now();
        inner.entries.retain(|_, entry| entry.expires_at > now);

        while inner.entries.len() >= max_entries {
            let Some(oldest) = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(key, _)| key.clone())
            else {
                return;
            };
            inner.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(bytes: &'static [u8]) -> CacheValue {
        CacheValue::Icon(Bytes::from_static(bytes))
    }

    fn icon_bytes(value: CacheValue) -> Bytes {
        match value {
            CacheValue::Icon(bytes) => bytes,
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn round_trips_before_expiry() {
        let cache = TtlCache::new(Duration::from_secs(60), 16);
        cache.insert(icon_key(1), icon(b"png"));

        let value = cache.get(&icon_key(1)).expect("entry should be live");
        assert_eq!(icon_bytes(value), Bytes::from_static(b"png"));
    }

    #[test]
    fn expired_entries_are_absent() {
        let cache = TtlCache::new(Duration::from_secs(60), 16);
        cache.insert_with_ttl(icon_key(1), icon(b"png"), Duration::ZERO);

        assert!(cache.get(&icon_key(1)).is_none());
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn counts_hits_and_misses() {
        let cache = TtlCache::new(Duration::from_secs(60), 16);
        cache.insert(icon_key(1), icon(b"png"));

        cache.get(&icon_key(1));
        cache.get(&icon_key(1));
        cache.get(&icon_key(2));

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn capacity_backstop_evicts_oldest_expiring() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.insert_with_ttl(icon_key(1), icon(b"a"), Duration::from_secs(10));
        cache.insert_with_ttl(icon_key(2), icon(b"b"), Duration::from_secs(20));
        cache.insert_with_ttl(icon_key(3), icon(b"c"), Duration::from_secs(30));

        let mut keys = cache.keys();
        keys.sort();
        assert_eq!(keys, vec![icon_key(2), icon_key(3)]);
    }

    #[test]
    fn reinserting_an_existing_key_does_not_evict() {
        let cache = TtlCache::new(Duration::from_secs(60), 2);
        cache.insert(icon_key(1), icon(b"a"));
        cache.insert(icon_key(2), icon(b"b"));
        cache.insert(icon_key(2), icon(b"b2"));

        assert_eq!(cache.keys().len(), 2);
        assert!(cache.get(&icon_key(1)).is_some());
    }
}
