//! Domain-specific error types and error handling.

use ns_shared::error_codes;
use thiserror::Error;

/// Core domain errors
///
/// Every failure a service can report. The presentation layer maps each
/// variant to an HTTP status and a shared error code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Rate limit exceeded, retry in {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("{provider} request failed: {message}")]
    Upstream { provider: String, message: String },

    #[error("Timed out waiting for {operation}")]
    Timeout { operation: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Service not configured: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Shared error code for this variant
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Upstream { .. } => error_codes::UPSTREAM_ERROR,
            DomainError::Timeout { .. } => error_codes::UPSTREAM_TIMEOUT,
            DomainError::Unauthorized => error_codes::UNAUTHORIZED,
            DomainError::Configuration { .. } => error_codes::CONFIGURATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// Whether the failure came from a third party rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, DomainError::Upstream { .. } | DomainError::Timeout { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
