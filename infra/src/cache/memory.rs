//! Process-local key-value store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use ns_core::{DomainError, DomainResult, KvStore};

struct Slot {
    value: String,
    expires_at: Instant,
}

/// `HashMap` guarded by a mutex; expiry is checked on read
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, Slot>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<std::sync::MutexGuard<'_, HashMap<String, Slot>>> {
        self.entries
            .lock()
            .map_err(|_| DomainError::internal("memory store lock poisoned"))
    }

    /// Drop expired entries, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        match self.entries.lock() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|_, slot| slot.expires_at > now);
                before - entries.len()
            }
            Err(_) => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(slot) if slot.expires_at > Instant::now() => Ok(Some(slot.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> DomainResult<()> {
        let slot = Slot {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.lock()?.insert(key.to_string(), slot);
        Ok(())
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
