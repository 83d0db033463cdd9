use moka::future::Cache;
use std::time::Duration;

/// Remembers where followed redirects led, so repeat requests skip the network
pub struct ResolutionCache {
    cache: Cache<String, String>,
}

impl ResolutionCache {
    /// Create a new cache with the specified max capacity and TTL
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        ResolutionCache { cache }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: String, canonical: String) {
        self.cache.insert(key, canonical).await;
    }

    /// Approximate number of live entries
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

/// Create a default cache: 1000 entries, 1 hour TTL
pub fn create_default_resolution_cache() -> ResolutionCache {
    ResolutionCache::new(1000, Duration::from_secs(3600))
}
