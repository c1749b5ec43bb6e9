//! Key-value store trait definition.

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::DomainError;

/// String key-value store with per-key expiry
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a value; expired keys read as `None`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write a value that expires after `ttl`
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
