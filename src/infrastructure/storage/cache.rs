// In-memory query cache using DashMap
use crate::domain::model::{CacheStats, ResultPage};
use crate::domain::query_key::QueryKey;
use crate::domain::traits::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    payload: ResultPage,
    stored_at: DateTime<Utc>,
}

/// Time-boxed page cache keyed by canonical query.
///
/// Entries past their TTL are treated as absent and dropped on the next read.
/// There is no capacity bound.
pub struct QueryCache {
    map: DashMap<QueryKey, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn with_system_clock(ttl: Duration) -> Self {
        Self::new(ttl, Arc::new(SystemClock))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &QueryKey) -> Option<ResultPage> {
        let now = self.clock.now();
        if let Some(entry) = self.map.get(key) {
            if self.is_fresh(entry.stored_at, now) {
                return Some(entry.payload.clone());
            }
        }

        // Stale: evict, unless a fresh write landed in between
        self.map
            .remove_if(key, |_, entry| !self.is_fresh(entry.stored_at, now));
        None
    }

    pub fn set(&self, key: QueryKey, page: ResultPage) {
        self.map.insert(
            key,
            CacheEntry {
                payload: page,
                stored_at: self.clock.now(),
            },
        );
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let keys = self
            .map
            .iter()
            .map(|entry| entry.key().as_str().to_string())
            .collect();
        CacheStats {
            count: self.map.len(),
            keys,
        }
    }

    fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // 时钟回拨时 elapsed 为负，视为仍然有效
        match (now - stored_at).to_std() {
            Ok(elapsed) => elapsed < self.ttl,
            Err(_) => true,
        }
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_system_clock(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FilterState, OffsetMeta, PageMeta, PageRequest, Pagination, CategoryFormat};
    use crate::domain::query_key::CanonicalQuery;
    use std::sync::Mutex;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn key(page: u32) -> QueryKey {
        CanonicalQuery::build(
            &FilterState::default(),
            &Pagination::Offset,
            &PageRequest::page(page),
            10,
            CategoryFormat::Upper,
        )
        .unwrap()
        .key()
    }

    fn page(total: u64) -> ResultPage {
        ResultPage {
            items: Vec::new(),
            meta: PageMeta::Offset(OffsetMeta {
                total_items: total,
                total_pages: 1,
                page_index: 0,
                page_size: 10,
            }),
        }
    }

    fn cache_with_clock() -> (QueryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock(Mutex::new(Utc::now())));
        (QueryCache::new(DEFAULT_TTL, clock.clone()), clock)
    }

    #[test]
    fn test_set_get() {
        let (cache, _) = cache_with_clock();
        cache.set(key(0), page(3));
        assert_eq!(cache.get(&key(0)), Some(page(3)));
        assert_eq!(cache.get(&key(1)), None);
    }

    #[test]
    fn test_later_write_overwrites() {
        let (cache, _) = cache_with_clock();
        cache.set(key(0), page(3));
        cache.set(key(0), page(4));
        assert_eq!(cache.get(&key(0)), Some(page(4)));
        assert_eq!(cache.stats().count, 1);
    }

    #[test]
    fn test_expiry_is_lazy_and_evicts() {
        let (cache, clock) = cache_with_clock();
        cache.set(key(0), page(3));

        clock.advance(Duration::from_secs(299));
        assert!(cache.get(&key(0)).is_some());

        clock.advance(Duration::from_secs(1));
        assert_eq!(cache.stats().count, 1);
        assert!(cache.get(&key(0)).is_none());
        assert_eq!(cache.stats().count, 0);
    }

    #[test]
    fn test_clear_and_stats() {
        let (cache, _) = cache_with_clock();
        cache.set(key(0), page(1));
        cache.set(key(1), page(1));

        let stats = cache.stats();
        assert_eq!(stats.count, 2);
        assert!(stats.keys.contains(key(1).as_str()));

        cache.clear();
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
