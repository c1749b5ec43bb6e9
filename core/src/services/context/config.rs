//! Configuration for the context service

use std::time::Duration;

use ns_shared::ContextConfig;

#[derive(Debug, Clone)]
pub struct ContextServiceConfig {
    /// How long a fetched entry is served without refetching
    pub ttl: Duration,
    /// Entries stay in the store for `ttl * retention_factor` so an expired
    /// one can still be served when a refetch fails
    pub retention_factor: u32,
    pub key_prefix: String,
}

impl ContextServiceConfig {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }

    pub(crate) fn key(&self, source: &str) -> String {
        format!("{}:{}", self.key_prefix, source)
    }

    pub(crate) fn retention(&self) -> Duration {
        self.ttl.saturating_mul(self.retention_factor.max(1))
    }
}

impl Default for ContextServiceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            retention_factor: 24,
            key_prefix: "context".to_string(),
        }
    }
}

impl From<&ContextConfig> for ContextServiceConfig {
    fn from(config: &ContextConfig) -> Self {
        Self::new(Duration::from_secs(config.ttl_seconds))
    }
}
