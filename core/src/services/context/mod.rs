//! Fresh-context service module
//!
//! Serves short text snapshots of external sources (recent GitHub
//! activity, latest blog posts) from a TTL cache. An expired entry is
//! refetched; when the fetch fails the expired entry is served as stale,
//! and when there is nothing cached the fetcher's fallback text is used.

mod config;
mod service;
mod traits;


pub use config::ContextServiceConfig;
pub use service::{is_cache_valid, ContextService};
pub use traits::ContextFetcher;
