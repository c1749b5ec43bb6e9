//! Traits for SEO data and summary generation

use async_trait::async_trait;

use crate::domain::entities::audit::{
    AuditReport, BacklinkSummary, Competitor, DomainOverview, OnPageResult, RankedKeyword,
};
use crate::errors::DomainResult;

/// SEO data provider; each call backs one audit section
#[async_trait]
pub trait SeoDataProvider: Send + Sync {
    async fn domain_overview(&self, domain: &str) -> DomainResult<DomainOverview>;

    async fn backlinks_summary(&self, domain: &str) -> DomainResult<BacklinkSummary>;

    async fn ranked_keywords(&self, domain: &str, limit: u32) -> DomainResult<Vec<RankedKeyword>>;

    /// Technical check of a single page
    async fn on_page(&self, url: &str) -> DomainResult<OnPageResult>;

    async fn competitors(&self, domain: &str, limit: u32) -> DomainResult<Vec<Competitor>>;
}

/// Writes a short prose summary of a finished report
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn summarize(&self, report: &AuditReport) -> DomainResult<String>;
}
