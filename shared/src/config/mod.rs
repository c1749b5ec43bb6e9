//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `cache` - Key-value cache backend (memory or Redis)
//! - `environment` - Environment detection
//! - `providers` - Third-party API credentials and feature settings
//! - `rate_limit` - Fixed-window limits for public endpoints
//! - `server` - HTTP server binding and limits

pub mod cache;
pub mod environment;
pub mod providers;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub use cache::{CacheBackend, CacheConfig};
pub use environment::Environment;
pub use providers::{
    AuditConfig, ContextConfig, DataForSeoConfig, GitHubConfig, OpenAiConfig, PlacesConfig,
    ProvidersConfig, ResendConfig,
};
pub use rate_limit::{RateLimitConfig, WindowLimit};
pub use server::ServerConfig;

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("configuration error: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("configuration error: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Third-party providers
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Fresh-context cache settings
    #[serde(default)]
    pub context: ContextConfig,

    /// Audit generation settings
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            rate_limit: RateLimitConfig::development(),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            rate_limit: RateLimitConfig::production(),
            ..Default::default()
        }
    }

    /// Load layered configuration.
    ///
    /// Order (later wins): environment defaults, `config/<environment>.toml`
    /// if present, `NS__`-prefixed variables (e.g. `NS__SERVER__PORT`), then
    /// the plain provider variables read by [`AppConfig::apply_env_overrides`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let base = match environment {
            Environment::Production => Self::production(),
            _ => Self::development(),
        };

        let defaults = ::config::Config::try_from(&base)?;
        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(
                ::config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("NS")
                    .prefix_separator("__")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.environment = environment;
        config.apply_env_overrides();
        config.check()?;

        tracing::debug!(environment = %config.environment, "configuration loaded");
        Ok(config)
    }

    /// Build configuration from plain environment variables only
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                ..Self::development()
            },
            Environment::Development => Self::development(),
        };
        config.apply_env_overrides();
        config
    }

    /// Overlay the deployment's conventional variable names
    /// (`RESEND_API_KEY`, `GOOGLE_PLACES_API_KEY`, `REDIS_URL`, ...).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self.cache.apply_env_overrides();
        self.providers.apply_env_overrides();
        self.context.apply_env_overrides();
    }

    /// Reject settings the server cannot run with
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.server.max_payload_size == 0 {
            return Err(ConfigError::Invalid("server.max_payload_size must be positive".into()));
        }
        let limits = &self.rate_limit;
        for (name, limit) in [
            ("contact", &limits.contact),
            ("audit", &limits.audit),
            ("places", &limits.places),
            ("api", &limits.api),
        ] {
            if limit.window_seconds == 0 {
                return Err(ConfigError::Invalid(format!(
                    "rate_limit.{}.window_seconds must be positive",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Names of provider settings that are missing.
    ///
    /// Missing credentials do not stop the server; the affected endpoints
    /// answer with a configuration error instead.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let p = &self.providers;
        if p.resend.api_key.is_none() {
            missing.push("RESEND_API_KEY");
        }
        if p.places.api_key.is_none() {
            missing.push("GOOGLE_PLACES_API_KEY");
        }
        if p.dataforseo.login.is_none() || p.dataforseo.password.is_none() {
            missing.push("DATAFORSEO_LOGIN/DATAFORSEO_PASSWORD");
        }
        if p.openai.api_key.is_none() {
            missing.push("OPENAI_API_KEY");
        }
        missing
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}
