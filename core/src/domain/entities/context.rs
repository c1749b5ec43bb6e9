//! Fresh-context cache entries

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// What is stored in the key-value store for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub source: String,
    pub content: String,
    pub fetched_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl ContextEntry {
    pub fn new(source: impl Into<String>, content: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            fetched_at: Utc::now(),
            ttl_seconds,
        }
    }

    /// End of validity; saturates at the latest representable time
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.fetched_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// What the service hands back for one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextResult {
    pub source: String,
    pub content: String,
    pub fetched_at: Option<DateTime<Utc>>,
    pub from_cache: bool,
    /// Expired entry served because the refetch failed
    pub stale: bool,
    /// Static fallback served because nothing was available
    pub fallback: bool,
}

impl ContextResult {
    pub fn fresh(entry: ContextEntry) -> Self {
        Self {
            source: entry.source,
            content: entry.content,
            fetched_at: Some(entry.fetched_at),
            from_cache: false,
            stale: false,
            fallback: false,
        }
    }

    pub fn cached(entry: ContextEntry) -> Self {
        Self {
            from_cache: true,
            ..Self::fresh(entry)
        }
    }

    pub fn stale(entry: ContextEntry) -> Self {
        Self {
            stale: true,
            ..Self::cached(entry)
        }
    }

    pub fn fallback(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            fetched_at: None,
            from_cache: false,
            stale: false,
            fallback: true,
        }
    }
}
