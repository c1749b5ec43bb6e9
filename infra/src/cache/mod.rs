//! Key-value stores backing the fresh-context cache
//!
//! `create_kv_store` picks Redis when configured and reachable, otherwise
//! the process-local memory store.

pub mod memory;
#[cfg(feature = "redis-cache")]
pub mod redis;

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use ns_core::{DomainResult, KvStore};
use ns_shared::config::{CacheBackend, CacheConfig};

pub use memory::MemoryKvStore;
#[cfg(feature = "redis-cache")]
pub use self::redis::RedisKvStore;

/// Concrete store selected at startup
pub enum KvBackend {
    Memory(MemoryKvStore),
    #[cfg(feature = "redis-cache")]
    Redis(RedisKvStore),
}

impl KvBackend {
    pub fn backend_name(&self) -> &'static str {
        match self {
            KvBackend::Memory(_) => "memory",
            #[cfg(feature = "redis-cache")]
            KvBackend::Redis(_) => "redis",
        }
    }
}

#[async_trait]
impl KvStore for KvBackend {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        match self {
            KvBackend::Memory(store) => store.get(key).await,
            #[cfg(feature = "redis-cache")]
            KvBackend::Redis(store) => store.get(key).await,
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        match self {
            KvBackend::Memory(store) => store.put(key, value, ttl).await,
            #[cfg(feature = "redis-cache")]
            KvBackend::Redis(store) => store.put(key, value, ttl).await,
        }
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        match self {
            KvBackend::Memory(store) => store.delete(key).await,
            #[cfg(feature = "redis-cache")]
            KvBackend::Redis(store) => store.delete(key).await,
        }
    }
}

/// Build the configured store, falling back to memory when Redis is
/// unavailable.
pub async fn create_kv_store(config: &CacheConfig) -> KvBackend {
    match config.backend {
        CacheBackend::Memory => {
            info!("Using in-memory key-value store");
            KvBackend::Memory(MemoryKvStore::new())
        }
        #[cfg(feature = "redis-cache")]
        CacheBackend::Redis => match RedisKvStore::connect(config).await {
            Ok(store) => {
                info!("Using Redis key-value store");
                KvBackend::Redis(store)
            }
            Err(e) => {
                warn!("Redis unavailable ({}), falling back to in-memory store", e);
                KvBackend::Memory(MemoryKvStore::new())
            }
        },
        #[cfg(not(feature = "redis-cache"))]
        CacheBackend::Redis => {
            warn!("Redis support not compiled in, using in-memory store");
            KvBackend::Memory(MemoryKvStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_selected() {
        let store = create_kv_store(&CacheConfig::default()).await;
        assert_eq!(store.backend_name(), "memory");

        store.put("k", "v", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[cfg(feature = "redis-cache")]
    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let config = CacheConfig::redis("redis://127.0.0.1:1");
        let store = create_kv_store(&config).await;
        assert_eq!(store.backend_name(), "memory");
    }
}
