use dashmap::DashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// Key/value cache with a per-entry TTL.
///
/// Expiry is lazy: an entry is only evicted when a read finds it stale.
pub struct DataCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
}

impl<T: Clone> DataCache<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn set(&self, key: &str, data: T, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                created_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Returns the value while `now - created_at < ttl`, evicting it otherwise.
    pub fn get(&self, key: &str) -> Option<T> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Some(entry.data.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        None
    }

    #[allow(dead_code)]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[allow(dead_code)]
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included until they are read.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Serves `key` from the cache or runs `fetch` and stores a successful result.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get(key) {
            debug!("Cache hit for key: {}", key);
            return Ok(hit);
        }
        debug!("Cache miss for key: {}, fetching", key);
        let data = fetch().await?;
        self.set(key, data.clone(), ttl);
        Ok(data)
    }
}

impl<T: Clone> Default for DataCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn returns_value_right_after_set() {
        let cache = DataCache::new();
        cache.set("yahoo:^TWII", 42.0, Duration::from_secs(60));
        assert_eq!(cache.get("yahoo:^TWII"), Some(42.0));
        assert!(cache.has("yahoo:^TWII"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn zero_ttl_is_immediately_stale_and_evicted() {
        let cache = DataCache::new();
        cache.set("k", "v".to_string(), Duration::ZERO);
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn expires_after_ttl_elapses() {
        let cache = DataCache::new();
        cache.set("k", 1u32, Duration::from_millis(40));
        assert_eq!(cache.get("k"), Some(1));
        std::thread::sleep(Duration::from_millis(80));
        assert!(!cache.has("k"));
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn delete_clear_and_keys() {
        let cache = DataCache::new();
        cache.set("b", 2, Duration::from_secs(60));
        cache.set("a", 1, Duration::from_secs(60));
        assert_eq!(cache.keys(), vec!["a".to_string(), "b".to_string()]);
        cache.delete("a");
        assert_eq!(cache.get("a"), None);
        cache.clear();
        assert_eq!(cache.size(), 0);
    }

    #[tokio::test]
    async fn get_or_fetch_caches_successes_only() {
        let cache: DataCache<u32> = DataCache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        let failed: Result<u32, String> = cache
            .get_or_fetch("k", ttl, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("boom".to_string())
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.size(), 0);

        for _ in 0..3 {
            let value: Result<u32, String> = cache
                .get_or_fetch("k", ttl, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await;
            assert_eq!(value.unwrap(), 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
