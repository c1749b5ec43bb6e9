//! SEO audit service module
//!
//! This module builds a website audit from independent provider sections:
//! - URL sanitization down to a bare domain
//! - Concurrent fan-out to the SEO data provider under one deadline
//! - Partial results when individual sections fail
//! - Weighted scoring and rule-based recommendations
//! - Optional generated summary with a rule-based fallback

mod config;
mod scoring;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::AuditServiceConfig;
pub use scoring::{recommendations, rule_summary, score};
pub use service::AuditService;
pub use traits::{InsightGenerator, SeoDataProvider};
