//! Cache configuration module

use serde::{Deserialize, Serialize};

/// Which key-value store backs the fresh-context cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process-local map; lost on restart
    #[default]
    Memory,
    /// Shared Redis instance
    Redis,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => Err(format!("Unknown cache backend: {}", other)),
        }
    }
}

/// Key-value cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Default TTL for cache entries in seconds
    #[serde(default = "default_ttl")]
    pub default_ttl: u64,

    /// Prefix applied to every cache key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            url: String::from("redis://localhost:6379"),
            default_ttl: default_ttl(),
            key_prefix: Some(String::from("northstar")),
        }
    }
}

impl CacheConfig {
    /// Create a Redis-backed configuration
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix for all cache keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a cache key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.url = url;
            self.backend = CacheBackend::Redis;
        }
        if let Some(backend) = std::env::var("CACHE_BACKEND").ok().and_then(|b| b.parse().ok()) {
            self.backend = backend;
        }
    }
}

fn default_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key_with_and_without_prefix() {
        let config = CacheConfig::default().with_prefix("ns");
        assert_eq!(config.make_key("context:github"), "ns:context:github");

        let bare = CacheConfig {
            key_prefix: None,
            ..Default::default()
        };
        assert_eq!(bare.make_key("context:github"), "context:github");
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Redis".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
        assert_eq!("mem".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
        assert!("memcached".parse::<CacheBackend>().is_err());
    }
}
