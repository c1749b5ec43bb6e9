//! Configuration for the audit service

use std::time::Duration;

use ns_shared::AuditConfig;

#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Deadline for the whole provider fan-out
    pub timeout: Duration,
    /// Deadline for the generated summary
    pub insight_timeout: Duration,
    pub keyword_limit: u32,
    pub competitor_limit: u32,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(25),
            insight_timeout: Duration::from_secs(10),
            keyword_limit: 10,
            competitor_limit: 5,
        }
    }
}

impl From<&AuditConfig> for AuditServiceConfig {
    fn from(config: &AuditConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            keyword_limit: config.keyword_limit,
            competitor_limit: config.competitor_limit,
            ..Self::default()
        }
    }
}
