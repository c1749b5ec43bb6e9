//! Trait for context sources

use async_trait::async_trait;

use crate::errors::DomainResult;

/// One external source of context text
#[async_trait]
pub trait ContextFetcher: Send + Sync {
    /// Registry name, e.g. `github`
    fn source(&self) -> &str;

    async fn fetch(&self) -> DomainResult<String>;

    /// Text served when nothing has ever been fetched
    fn fallback(&self) -> String;
}
