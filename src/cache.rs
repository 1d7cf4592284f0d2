//! Response caching partitioned by data volatility.
//!
//! Two moka caches with independent TTLs and capacity bounds:
//!
//! - [`CacheClass::Structure`] — slow-changing hierarchy metadata
//!   (workspaces, spaces, folders, lists). Longer TTL, larger store.
//! - [`CacheClass::Volatile`] — frequently-mutated resources (tasks,
//!   comments, time entries). Short TTL, smaller store.
//!
//! Reads never trigger network activity; writes happen only after a
//! successful response. Expiry is enforced by moka on read; capacity by
//! eviction. Mutating calls invalidate every cached entry touching the
//! same resource — see [`ResponseCache::invalidate_resource()`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::CachePartition;
use crate::telemetry;

/// Volatility class of a cacheable response, determining its TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    /// Structural metadata: 300s TTL by default.
    Structure,
    /// Frequently-mutated resources: 60s TTL by default.
    Volatile,
}

impl CacheClass {
    fn label(self) -> &'static str {
        match self {
            CacheClass::Structure => "structure",
            CacheClass::Volatile => "volatile",
        }
    }
}

/// TTL + capacity bounded memo of recent successful responses.
///
/// Keys come from [`Endpoint::cache_key()`](crate::endpoint::Endpoint::cache_key);
/// values are the raw decoded response bodies.
pub struct ResponseCache {
    structure: moka::future::Cache<String, Value>,
    volatile: moka::future::Cache<String, Value>,
}

impl ResponseCache {
    /// Build both partitions from their settings.
    pub fn new(structure: &CachePartition, volatile: &CachePartition) -> Self {
        Self {
            structure: build_partition(structure),
            volatile: build_partition(volatile),
        }
    }

    fn partition(&self, class: CacheClass) -> &moka::future::Cache<String, Value> {
        match class {
            CacheClass::Structure => &self.structure,
            CacheClass::Volatile => &self.volatile,
        }
    }

    /// Look up an unexpired entry. Emits cache hit/miss metrics.
    pub async fn get(&self, class: CacheClass, key: &str) -> Option<Value> {
        match self.partition(class).get(key).await {
            Some(value) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "class" => class.label())
                    .increment(1);
                debug!(key, class = class.label(), "cache hit");
                Some(value)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "class" => class.label())
                    .increment(1);
                None
            }
        }
    }

    /// Store a successful response.
    pub async fn put(&self, class: CacheClass, key: String, value: Value) {
        debug!(key, class = class.label(), "cache store");
        self.partition(class).insert(key, value).await;
    }

    /// Drop every entry (both partitions) whose key contains one of the
    /// given `"/{kind}/{id}"` needles. Called after a successful mutation
    /// so stale reads cannot be served past it.
    ///
    /// Keys are `"{version}:{METHOD}:{path}?{query}"`, so a matching
    /// segment pair is always followed by `/` or `?`. Matching the bounded
    /// forms keeps `/list/9` from also hitting `/list/99`.
    pub fn invalidate_resource(&self, needles: &[String]) {
        if needles.is_empty() {
            return;
        }
        let bounded: Vec<String> = needles
            .iter()
            .flat_map(|n| [format!("{n}/"), format!("{n}?")])
            .collect();
        for cache in [&self.structure, &self.volatile] {
            let bounded = bounded.clone();
            if let Err(e) =
                cache.invalidate_entries_if(move |key, _| bounded.iter().any(|n| key.contains(n.as_str())))
            {
                warn!(error = %e, "cache invalidation predicate rejected");
            }
        }
    }

    /// Entry count across both partitions (post-housekeeping; approximate).
    pub fn len(&self) -> u64 {
        self.structure.entry_count() + self.volatile.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn build_partition(settings: &CachePartition) -> moka::future::Cache<String, Value> {
    moka::future::Cache::builder()
        .max_capacity(settings.capacity)
        .time_to_live(settings.ttl)
        .support_invalidation_closures()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn small_cache(ttl: Duration) -> ResponseCache {
        let partition = CachePartition { ttl, capacity: 16 };
        ResponseCache::new(&partition, &partition)
    }

    #[tokio::test]
    async fn serves_fresh_entry() {
        let cache = small_cache(Duration::from_secs(60));
        cache
            .put(CacheClass::Structure, "k".into(), json!({"a": 1}))
            .await;
        assert_eq!(
            cache.get(CacheClass::Structure, "k").await,
            Some(json!({"a": 1}))
        );
    }

    #[tokio::test]
    async fn partitions_are_independent() {
        let cache = small_cache(Duration::from_secs(60));
        cache
            .put(CacheClass::Structure, "k".into(), json!(1))
            .await;
        assert!(cache.get(CacheClass::Volatile, "k").await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss() {
        let cache = small_cache(Duration::from_millis(30));
        cache.put(CacheClass::Volatile, "k".into(), json!(1)).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.get(CacheClass::Volatile, "k").await.is_none());
    }

    #[tokio::test]
    async fn invalidation_matches_resource_needle() {
        let cache = small_cache(Duration::from_secs(60));
        cache
            .put(
                CacheClass::Volatile,
                "v2:GET:/list/9/task?page=0".into(),
                json!(1),
            )
            .await;
        cache
            .put(
                CacheClass::Volatile,
                "v2:GET:/list/10/task?page=0".into(),
                json!(2),
            )
            .await;

        cache.invalidate_resource(&["/list/9".to_string()]);

        assert!(
            cache
                .get(CacheClass::Volatile, "v2:GET:/list/9/task?page=0")
                .await
                .is_none()
        );
        assert_eq!(
            cache
                .get(CacheClass::Volatile, "v2:GET:/list/10/task?page=0")
                .await,
            Some(json!(2))
        );
    }

    #[tokio::test]
    async fn invalidation_does_not_hit_sibling_id_prefixes() {
        let cache = small_cache(Duration::from_secs(60));
        cache
            .put(
                CacheClass::Volatile,
                "v2:GET:/list/99/task?page=0".into(),
                json!(1),
            )
            .await;
        cache
            .put(CacheClass::Volatile, "v2:GET:/list/9?".into(), json!(2))
            .await;

        cache.invalidate_resource(&["/list/9".to_string()]);

        // /list/99 shares a prefix with /list/9 but is a different list.
        assert_eq!(
            cache
                .get(CacheClass::Volatile, "v2:GET:/list/99/task?page=0")
                .await,
            Some(json!(1))
        );
        assert!(
            cache
                .get(CacheClass::Volatile, "v2:GET:/list/9?")
                .await
                .is_none()
        );
    }
}
