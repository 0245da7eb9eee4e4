//! # Leaderboard Cache-Aside Service
//!
//! Read-through leaderboard for the "top ordered products per area" query:
//! check the cache, on a miss run the aggregation, populate the cache with a
//! bounded TTL, return the freshly computed rows.
//!
//! Cache entries are never invalidated on writes; an entry is either exactly
//! what was last computed for its area or absent. Concurrent cold-cache
//! callers may each compute and write - the result is an idempotent
//! derivation, so last write wins.

use std::sync::Arc;
use std::time::Duration;

use catalog_domain::LeaderboardEntry;

use crate::cache::CacheStore;
use crate::error::{LeaderboardError, PersistenceError};
use crate::repository::LeaderboardRepository;

/// Number of ranked products returned per area.
pub const TOP_PRODUCTS_LIMIT: i64 = 10;

const CACHE_KEY_PREFIX: &str = "top_products:";

/// Cache key for an area's leaderboard. The area is taken verbatim:
/// case-sensitive, no normalization, no hashing.
#[must_use]
pub fn cache_key(area: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{area}")
}

/// Cache-aside orchestrator over the aggregation query.
pub struct LeaderboardService {
    repo: Arc<dyn LeaderboardRepository>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl LeaderboardService {
    pub fn new(
        repo: Arc<dyn LeaderboardRepository>,
        cache: Arc<dyn CacheStore>,
        ttl: Duration,
    ) -> Self {
        Self { repo, cache, ttl }
    }

    /// Top ordered products for `area`, served from cache when possible.
    ///
    /// On a hit the aggregation query is not invoked. On a miss the query
    /// runs exactly once and its result - including an empty one - is
    /// written back under the area's key with the configured TTL.
    ///
    /// # Errors
    ///
    /// - [`LeaderboardError::CacheUnavailable`] when the cache store fails
    ///   on lookup or write-back, or holds an undecodable payload. An outage
    ///   is surfaced rather than masked as a cold cache.
    /// - [`LeaderboardError::ComputationFailed`] when the aggregation query
    ///   fails on the miss path; no cache write happens in that case.
    pub async fn get_top_ordered_products(
        &self,
        area: &str,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let key = cache_key(area);

        let cached = self
            .cache
            .get(&key)
            .await
            .map_err(LeaderboardError::CacheUnavailable)?;

        if let Some(raw) = cached.filter(|value| !value.is_empty()) {
            tracing::debug!(%area, "leaderboard cache hit");
            let entries = serde_json::from_str(&raw).map_err(|err| {
                LeaderboardError::CacheUnavailable(PersistenceError::Serialization(
                    err.to_string(),
                ))
            })?;
            return Ok(entries);
        }

        tracing::debug!(%area, "leaderboard cache miss, running aggregation");
        let entries = self
            .repo
            .top_by_area(area, TOP_PRODUCTS_LIMIT)
            .await
            .map_err(LeaderboardError::ComputationFailed)?;

        // Empty results are cached too, so areas with no orders do not
        // trigger the aggregation on every call.
        let payload = serde_json::to_string(&entries).map_err(|err| {
            LeaderboardError::ComputationFailed(PersistenceError::Serialization(err.to_string()))
        })?;
        self.cache
            .set_ex(&key, &payload, self.ttl)
            .await
            .map_err(LeaderboardError::CacheUnavailable)?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    const TTL: Duration = Duration::from_secs(3600);

    struct MockCache {
        entries: Mutex<HashMap<String, String>>,
        sets: Mutex<Vec<(String, String, Duration)>>,
        fail_get: bool,
        fail_set: bool,
    }

    impl MockCache {
        fn empty() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                sets: Mutex::new(Vec::new()),
                fail_get: false,
                fail_set: false,
            }
        }

        fn seeded(key: &str, value: &str) -> Self {
            let cache = Self::empty();
            cache
                .entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            cache
        }

        fn failing_get() -> Self {
            Self {
                fail_get: true,
                ..Self::empty()
            }
        }

        fn failing_set() -> Self {
            Self {
                fail_set: true,
                ..Self::empty()
            }
        }
    }

    #[async_trait]
    impl CacheStore for MockCache {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_get {
                return Err(PersistenceError::Cache("connection refused".to_string()));
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
            if self.fail_set {
                return Err(PersistenceError::Cache("connection refused".to_string()));
            }
            self.sets
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), ttl));
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct MockRepo {
        rows: Vec<LeaderboardEntry>,
        fail: bool,
        calls: AtomicUsize,
        last_limit: AtomicI64,
    }

    impl MockRepo {
        fn returning(rows: Vec<LeaderboardEntry>) -> Self {
            Self {
                rows,
                fail: false,
                calls: AtomicUsize::new(0),
                last_limit: AtomicI64::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                rows: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
                last_limit: AtomicI64::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LeaderboardRepository for MockRepo {
        async fn top_by_area(&self, _area: &str, limit: i64) -> Result<Vec<LeaderboardEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_limit.store(limit, Ordering::SeqCst);
            if self.fail {
                return Err(PersistenceError::Database("relation is on fire".to_string()));
            }
            Ok(self
                .rows
                .iter()
                .take(usize::try_from(limit).unwrap())
                .cloned()
                .collect())
        }
    }

    fn entry(id: i64, total_quantity: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            id,
            name: format!("Product {id}"),
            category: format!("Category {id}"),
            area: "Nasr city".to_string(),
            total_quantity,
        }
    }

    fn nasr_city_rows() -> Vec<LeaderboardEntry> {
        vec![entry(1, 100), entry(2, 80)]
    }

    fn service(repo: Arc<MockRepo>, cache: Arc<MockCache>) -> LeaderboardService {
        LeaderboardService::new(repo, cache, TTL)
    }

    #[test]
    fn cache_key_is_verbatim_and_case_sensitive() {
        assert_eq!(cache_key("Nasr city"), "top_products:Nasr city");
        assert_ne!(cache_key("nasr city"), cache_key("Nasr city"));
        assert_eq!(cache_key(""), "top_products:");
    }

    #[tokio::test]
    async fn hit_returns_cached_rows_without_querying() {
        let rows = nasr_city_rows();
        let cached = serde_json::to_string(&rows).unwrap();
        let cache = Arc::new(MockCache::seeded("top_products:Nasr city", &cached));
        let repo = Arc::new(MockRepo::returning(vec![entry(9, 999)]));

        let result = service(repo.clone(), cache.clone())
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap();

        assert_eq!(result, rows);
        assert_eq!(repo.call_count(), 0);
        assert!(cache.sets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn miss_computes_once_and_populates_cache() {
        let rows = nasr_city_rows();
        let cache = Arc::new(MockCache::empty());
        let repo = Arc::new(MockRepo::returning(rows.clone()));

        let result = service(repo.clone(), cache.clone())
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap();

        assert_eq!(result, rows);
        assert_eq!(repo.call_count(), 1);
        assert_eq!(repo.last_limit.load(Ordering::SeqCst), TOP_PRODUCTS_LIMIT);

        let sets = cache.sets.lock().unwrap();
        assert_eq!(sets.len(), 1);
        let (key, payload, ttl) = &sets[0];
        assert_eq!(key, "top_products:Nasr city");
        assert_eq!(*ttl, TTL);
        let written: Vec<LeaderboardEntry> = serde_json::from_str(payload).unwrap();
        assert_eq!(written, rows);
    }

    #[tokio::test]
    async fn empty_result_is_cached() {
        let cache = Arc::new(MockCache::empty());
        let repo = Arc::new(MockRepo::returning(Vec::new()));

        let result = service(repo.clone(), cache.clone())
            .get_top_ordered_products("Empty Town")
            .await
            .unwrap();

        assert!(result.is_empty());
        let sets = cache.sets.lock().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].0, "top_products:Empty Town");
        assert_eq!(sets[0].1, "[]");
    }

    #[tokio::test]
    async fn empty_cached_value_counts_as_miss() {
        let rows = nasr_city_rows();
        let cache = Arc::new(MockCache::seeded("top_products:Nasr city", ""));
        let repo = Arc::new(MockRepo::returning(rows.clone()));

        let result = service(repo.clone(), cache)
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap();

        assert_eq!(result, rows);
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn query_failure_surfaces_without_cache_write() {
        let cache = Arc::new(MockCache::empty());
        let repo = Arc::new(MockRepo::failing());

        let err = service(repo, cache.clone())
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaderboardError::ComputationFailed(_)));
        assert!(cache.sets.lock().unwrap().is_empty());
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cache_read_failure_is_not_treated_as_miss() {
        let cache = Arc::new(MockCache::failing_get());
        let repo = Arc::new(MockRepo::returning(nasr_city_rows()));

        let err = service(repo.clone(), cache)
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaderboardError::CacheUnavailable(_)));
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn cache_write_failure_surfaces() {
        let cache = Arc::new(MockCache::failing_set());
        let repo = Arc::new(MockRepo::returning(nasr_city_rows()));

        let err = service(repo, cache)
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaderboardError::CacheUnavailable(_)));
    }

    #[tokio::test]
    async fn corrupt_cached_payload_surfaces() {
        let cache = Arc::new(MockCache::seeded("top_products:Nasr city", "not json"));
        let repo = Arc::new(MockRepo::returning(nasr_city_rows()));

        let err = service(repo.clone(), cache)
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaderboardError::CacheUnavailable(_)));
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn second_call_hits_cache_and_matches_first() {
        let cache = Arc::new(MockCache::empty());
        let repo = Arc::new(MockRepo::returning(nasr_city_rows()));
        let svc = service(repo.clone(), cache);

        let first = svc.get_top_ordered_products("Nasr city").await.unwrap();
        let second = svc.get_top_ordered_products("Nasr city").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.call_count(), 1);
    }

    #[tokio::test]
    async fn result_is_descending_and_capped_at_ten() {
        let wide: Vec<LeaderboardEntry> =
            (0..15).map(|i| entry(i + 1, 150 - i * 10)).collect();
        let cache = Arc::new(MockCache::empty());
        let repo = Arc::new(MockRepo::returning(wide));

        let result = service(repo, cache)
            .get_top_ordered_products("Nasr city")
            .await
            .unwrap();

        assert!(result.len() <= 10);
        for pair in result.windows(2) {
            assert!(pair[0].total_quantity >= pair[1].total_quantity);
        }
    }
}
