//! Main context service implementation

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::context::{ContextEntry, ContextResult};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::KvStore;

use super::config::ContextServiceConfig;
use super::traits::ContextFetcher;

/// Whether `entry` is still within its TTL at `now`
pub fn is_cache_valid(entry: &ContextEntry, now: DateTime<Utc>) -> bool {
    now < entry.expires_at()
}

pub struct ContextService<K: KvStore> {
    store: Arc<K>,
    fetchers: BTreeMap<String, Arc<dyn ContextFetcher>>,
    config: ContextServiceConfig,
}

impl<K: KvStore> ContextService<K> {
    pub fn new(store: Arc<K>, config: ContextServiceConfig) -> Self {
        Self {
            store,
            fetchers: BTreeMap::new(),
            config,
        }
    }

    /// Register a source; a later fetcher with the same name replaces it
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ContextFetcher>) -> Self {
        self.register(fetcher);
        self
    }

    pub fn register(&mut self, fetcher: Arc<dyn ContextFetcher>) {
        self.fetchers.insert(fetcher.source().to_string(), fetcher);
    }

    pub fn sources(&self) -> Vec<&str> {
        self.fetchers.keys().map(String::as_str).collect()
    }

    fn fetcher(&self, source: &str) -> DomainResult<&Arc<dyn ContextFetcher>> {
        self.fetchers
            .get(source)
            .ok_or_else(|| DomainError::not_found(format!("context source '{}'", source)))
    }

    /// Cached context for `source`, refetched when expired
    pub async fn get(&self, source: &str) -> DomainResult<ContextResult> {
        let fetcher = self.fetcher(source)?;
        let cached = self.read_cache(source).await;

        if let Some(entry) = &cached {
            if is_cache_valid(entry, Utc::now()) {
                return Ok(ContextResult::cached(entry.clone()));
            }
        }

        match self.fetch_and_store(fetcher.as_ref()).await {
            Ok(entry) => Ok(ContextResult::fresh(entry)),
            Err(e) => {
                tracing::warn!(source, error = %e, stale = cached.is_some(), "context fetch failed");
                Ok(match cached {
                    Some(entry) => ContextResult::stale(entry),
                    None => ContextResult::fallback(source, fetcher.fallback()),
                })
            }
        }
    }

    /// Every registered source, fetched concurrently
    pub async fn get_all(&self) -> Vec<ContextResult> {
        let results = join_all(self.fetchers.keys().map(|source| self.get(source))).await;
        results.into_iter().filter_map(Result::ok).collect()
    }

    /// Fetch bypassing the cache; one source, or all of them when `None`
    pub async fn refresh(&self, source: Option<&str>) -> DomainResult<Vec<ContextResult>> {
        let targets: Vec<&Arc<dyn ContextFetcher>> = match source {
            Some(source) => vec![self.fetcher(source)?],
            None => self.fetchers.values().collect(),
        };

        let results = join_all(targets.into_iter().map(|f| self.fetch_and_store(f.as_ref()))).await;
        let entries = results.into_iter().collect::<DomainResult<Vec<_>>>()?;

        tracing::info!(count = entries.len(), "context refreshed");
        Ok(entries.into_iter().map(ContextResult::fresh).collect())
    }

    pub async fn invalidate(&self, source: &str) -> DomainResult<()> {
        self.fetcher(source)?;
        self.store.delete(&self.config.key(source)).await
    }

    async fn fetch_and_store(&self, fetcher: &dyn ContextFetcher) -> DomainResult<ContextEntry> {
        let source = fetcher.source();
        let content = fetcher.fetch().await.map_err(|e| match e {
            DomainError::Upstream { .. } => e,
            other => DomainError::upstream(source, other.to_string()),
        })?;

        let entry = ContextEntry::new(source, content, self.config.ttl.as_secs());
        self.write_cache(&entry).await;
        Ok(entry)
    }

    /// Store failures are treated as a miss
    async fn read_cache(&self, source: &str) -> Option<ContextEntry> {
        let raw = match self.store.get(&self.config.key(source)).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(source, error = %e, "context cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(source, error = %e, "discarding unreadable context cache entry");
                None
            }
        }
    }

    async fn write_cache(&self, entry: &ContextEntry) {
        let raw = match serde_json::to_string(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(source = %entry.source, error = %e, "failed to encode context entry");
                return;
            }
        };
        if let Err(e) = self
            .store
            .put(&self.config.key(&entry.source), &raw, self.config.retention())
            .await
        {
            tracing::warn!(source = %entry.source, error = %e, "context cache write failed");
        }
    }
}
