use async_trait::async_trait;
use moka::future::Cache;

/// Key-value store backing the resolution cache.
///
/// Implementations must tolerate the same key being written again with the
/// same value, since other writers may share the store.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores `value` under `key`, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// In-process cache store backed by moka.
///
/// Entries never expire. Once `max_capacity` is reached moka evicts the least
/// useful entries, which the resolver tolerates by re-synthesizing speech for
/// a translation whose speech entry went missing.
pub struct MokaCacheRepository {
    cache: Cache<String, String>,
}

impl MokaCacheRepository {
    pub fn new(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }
}

#[async_trait]
impl CacheRepository for MokaCacheRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        tracing::debug!(key = %key, "Cache entry stored");
        Ok(())
    }
}
