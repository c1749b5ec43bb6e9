//! Shared utilities and common types for the Northstar server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error codes and response structures
//! - Utility functions (validation, sanitization)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuditConfig, CacheBackend, CacheConfig, ConfigError, ContextConfig, Environment,
    ProvidersConfig, RateLimitConfig, ServerConfig, WindowLimit,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
pub use utils::{sanitize, validation};
