//! # Infrastructure Layer
//!
//! Concrete implementations of the provider and storage traits declared in
//! `ns_core`:
//!
//! - **Email**: Resend client and a logging mock
//! - **Places**: Google Places autocomplete and details
//! - **SEO**: DataForSEO live endpoints
//! - **Insight**: OpenAI chat completions for audit summaries
//! - **Context**: GitHub activity and RSS/Atom feed fetchers
//! - **Cache**: in-memory and Redis key-value stores
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis key-value store (default)

use ns_core::DomainError;

pub mod cache;
pub mod context;
pub mod email;
pub mod http;
pub mod insight;
pub mod places;
pub mod seo;

pub use cache::{create_kv_store, KvBackend, MemoryKvStore};
#[cfg(feature = "redis-cache")]
pub use cache::RedisKvStore;
pub use context::{GitHubActivityFetcher, RssFeedFetcher};
pub use email::{create_email_service, EmailService, MockEmailService, ResendEmailClient};
pub use insight::OpenAiInsightClient;
pub use places::GooglePlacesClient;
pub use seo::DataForSeoClient;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure talking to a provider
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Provider answered with an error
    #[error("{provider} error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// Provider doesn't know the requested resource
    #[error("{provider}: {resource} not found")]
    NotFound {
        provider: &'static str,
        resource: String,
    },

    /// Provider answered with something we can't read
    #[error("Unexpected response from {provider}: {message}")]
    Parse {
        provider: &'static str,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InfrastructureError {
    pub fn request(provider: &'static str, source: reqwest::Error) -> Self {
        InfrastructureError::Request { provider, source }
    }

    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        InfrastructureError::Provider {
            provider,
            message: message.into(),
        }
    }

    pub fn parse(provider: &'static str, message: impl Into<String>) -> Self {
        InfrastructureError::Parse {
            provider,
            message: message.into(),
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            #[cfg(feature = "redis-cache")]
            InfrastructureError::Cache(e) => DomainError::internal(format!("cache: {}", e)),
            InfrastructureError::Http(e) => DomainError::internal(format!("http client: {}", e)),
            InfrastructureError::Request { provider, source } if source.is_timeout() => {
                DomainError::Timeout {
                    operation: format!("{} request", provider),
                }
            }
            InfrastructureError::Request { provider, source } => {
                DomainError::upstream(provider, source.to_string())
            }
            InfrastructureError::Provider { provider, message }
            | InfrastructureError::Parse { provider, message } => {
                DomainError::upstream(provider, message)
            }
            InfrastructureError::NotFound { resource, .. } => DomainError::not_found(resource),
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            InfrastructureError::Serialization(e) => DomainError::internal(e.to_string()),
        }
    }
}
