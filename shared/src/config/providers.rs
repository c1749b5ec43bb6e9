//! Third-party provider configuration
//!
//! Credentials are optional: a missing key disables the matching endpoint
//! rather than preventing startup.

use serde::{Deserialize, Serialize};
use std::env;

/// Resend transactional email
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResendConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender, e.g. `Northstar <hello@northstar.digital>`
    #[serde(default = "default_from")]
    pub from: String,

    /// Inbox receiving contact-form notifications
    #[serde(default = "default_notify_to")]
    pub notify_to: String,
}

/// Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlacesConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    /// Restricts autocomplete to a region (ccTLD, e.g. `us`)
    #[serde(default)]
    pub region: Option<String>,
}

/// DataForSEO
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataForSeoConfig {
    #[serde(default)]
    pub login: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// DataForSEO location code (2840 = United States)
    #[serde(default = "default_location_code")]
    pub location_code: u32,

    #[serde(default = "default_language_code")]
    pub language_code: String,
}

impl Default for DataForSeoConfig {
    fn default() -> Self {
        Self {
            login: None,
            password: None,
            location_code: default_location_code(),
            language_code: default_language_code(),
        }
    }
}

/// OpenAI chat completions, used for audit summaries
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
        }
    }
}

/// GitHub activity feed for the fresh-context service
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}

/// All third-party providers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub resend: ResendConfig,

    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub dataforseo: DataForSeoConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub github: GitHubConfig,

    /// RSS feed of the agency blog
    #[serde(default)]
    pub blog_feed_url: Option<String>,

    /// Outbound HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            resend: ResendConfig {
                api_key: None,
                from: default_from(),
                notify_to: default_notify_to(),
            },
            places: PlacesConfig::default(),
            dataforseo: DataForSeoConfig::default(),
            openai: OpenAiConfig::default(),
            github: GitHubConfig::default(),
            blog_feed_url: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProvidersConfig {
    pub(crate) fn apply_env_overrides(&mut self) {
        override_opt(&mut self.resend.api_key, "RESEND_API_KEY");
        override_string(&mut self.resend.from, "EMAIL_FROM");
        override_string(&mut self.resend.notify_to, "CONTACT_EMAIL");
        override_opt(&mut self.places.api_key, "GOOGLE_PLACES_API_KEY");
        override_opt(&mut self.places.region, "GOOGLE_PLACES_REGION");
        override_opt(&mut self.dataforseo.login, "DATAFORSEO_LOGIN");
        override_opt(&mut self.dataforseo.password, "DATAFORSEO_PASSWORD");
        override_opt(&mut self.openai.api_key, "OPENAI_API_KEY");
        override_string(&mut self.openai.model, "OPENAI_MODEL");
        override_opt(&mut self.github.username, "GITHUB_USERNAME");
        override_opt(&mut self.github.token, "GITHUB_TOKEN");
        override_opt(&mut self.blog_feed_url, "BLOG_FEED_URL");
        if let Some(secs) = env::var("PROVIDER_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = secs;
        }
    }
}

/// Fresh-context cache settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContextConfig {
    /// How long a fetched context stays valid
    #[serde(default = "default_context_ttl")]
    pub ttl_seconds: u64,

    /// Bearer token required by `POST /api/context/refresh`
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_context_ttl(),
            refresh_token: None,
        }
    }
}

impl ContextConfig {
    pub(crate) fn apply_env_overrides(&mut self) {
        override_opt(&mut self.refresh_token, "CONTEXT_REFRESH_TOKEN");
        if let Some(ttl) = env::var("CONTEXT_TTL_SECONDS").ok().and_then(|v| v.parse().ok()) {
            self.ttl_seconds = ttl;
        }
    }
}

/// Audit generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Upper bound for the whole provider fan-out
    #[serde(default = "default_audit_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_keyword_limit")]
    pub keyword_limit: u32,

    #[serde(default = "default_competitor_limit")]
    pub competitor_limit: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_audit_timeout(),
            keyword_limit: default_keyword_limit(),
            competitor_limit: default_competitor_limit(),
        }
    }
}

fn override_opt(slot: &mut Option<String>, var: &str) {
    if let Ok(value) = env::var(var) {
        if !value.trim().is_empty() {
            *slot = Some(value);
        }
    }
}

fn override_string(slot: &mut String, var: &str) {
    if let Ok(value) = env::var(var) {
        if !value.trim().is_empty() {
            *slot = value;
        }
    }
}

fn default_from() -> String {
    String::from("Northstar Digital <hello@northstar.digital>")
}

fn default_notify_to() -> String {
    String::from("team@northstar.digital")
}

fn default_location_code() -> u32 {
    2840
}

fn default_language_code() -> String {
    String::from("en")
}

fn default_openai_model() -> String {
    String::from("gpt-4o-mini")
}

fn default_request_timeout() -> u64 {
    15
}

fn default_context_ttl() -> u64 {
    3600
}

fn default_audit_timeout() -> u64 {
    25
}

fn default_keyword_limit() -> u32 {
    10
}

fn default_competitor_limit() -> u32 {
    5
}
