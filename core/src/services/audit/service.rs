//! Main audit service implementation

use std::sync::Arc;

use ns_shared::sanitize::{normalize_domain, sanitize_text};
use ns_shared::validation::validators;

use crate::domain::entities::audit::{AuditReport, AuditRequest, AuditSection, AuditStatus};
use crate::errors::{DomainError, DomainResult};

use super::config::AuditServiceConfig;
use super::scoring;
use super::traits::{InsightGenerator, SeoDataProvider};

const BUSINESS_NAME_MAX: usize = 120;

/// Audit service
pub struct AuditService<S: SeoDataProvider, I: InsightGenerator> {
    seo: Arc<S>,
    insight: Arc<I>,
    config: AuditServiceConfig,
}

impl<S: SeoDataProvider, I: InsightGenerator> AuditService<S, I> {
    pub fn new(seo: Arc<S>, insight: Arc<I>, config: AuditServiceConfig) -> Self {
        Self {
            seo,
            insight,
            config,
        }
    }

    /// Build an audit for the requested site.
    ///
    /// The five provider calls run concurrently under `config.timeout`. A
    /// failing call leaves its section empty and marks the report partial;
    /// the request only fails when the deadline passes or every call fails.
    pub async fn generate(&self, request: AuditRequest) -> DomainResult<AuditReport> {
        let domain = normalize_domain(&request.url)
            .ok_or_else(|| DomainError::validation("url", "Enter a valid website address"))?;

        if let Some(email) = request.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !validators::is_valid_email(email) {
                return Err(DomainError::validation("email", "Invalid email address"));
            }
        }

        let business_name = request
            .business_name
            .map(|name| sanitize_text(&name, BUSINESS_NAME_MAX))
            .filter(|name| !name.is_empty());

        let url = format!("https://{}", domain);
        let seo = &self.seo;
        let fan_out = async {
            tokio::join!(
                seo.domain_overview(&domain),
                seo.backlinks_summary(&domain),
                seo.ranked_keywords(&domain, self.config.keyword_limit),
                seo.on_page(&url),
                seo.competitors(&domain, self.config.competitor_limit),
            )
        };

        let (overview, backlinks, keywords, on_page, competitors) =
            tokio::time::timeout(self.config.timeout, fan_out)
                .await
                .map_err(|_| {
                    tracing::warn!(domain = %domain, timeout = ?self.config.timeout, "audit fan-out timed out");
                    DomainError::Timeout {
                        operation: "audit generation".to_string(),
                    }
                })?;

        let mut failed = Vec::new();
        let mut report = AuditReport::new(domain.clone());
        report.url = url;
        report.business_name = business_name;
        report.overview = settle(AuditSection::Overview, overview, &mut failed);
        report.backlinks = settle(AuditSection::Backlinks, backlinks, &mut failed);
        report.keywords = settle(AuditSection::Keywords, keywords, &mut failed);
        report.on_page = settle(AuditSection::OnPage, on_page, &mut failed);
        report.competitors = settle(AuditSection::Competitors, competitors, &mut failed);

        if failed.len() == AuditSection::ALL.len() {
            tracing::error!(domain = %domain, "every audit section failed");
            return Err(DomainError::upstream("SEO data", "no audit data could be retrieved"));
        }

        report.status = if failed.is_empty() {
            AuditStatus::Complete
        } else {
            AuditStatus::Partial
        };
        report.failed_sections = failed;
        report.score = scoring::score(&report);
        report.recommendations = scoring::recommendations(&report);

        match tokio::time::timeout(self.config.insight_timeout, self.insight.summarize(&report)).await {
            Ok(Ok(summary)) if !summary.trim().is_empty() => {
                report.summary = summary.trim().to_string();
                report.ai_summary = true;
            }
            Ok(Ok(_)) => report.summary = scoring::rule_summary(&report),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "insight generation failed, using rule summary");
                report.summary = scoring::rule_summary(&report);
            }
            Err(_) => {
                tracing::warn!(domain = %domain, "insight generation timed out, using rule summary");
                report.summary = scoring::rule_summary(&report);
            }
        }

        tracing::info!(
            domain = %domain,
            score = report.score,
            status = ?report.status,
            failed = ?report.failed_sections,
            "audit generated"
        );
        Ok(report)
    }
}

/// Keep a section's value, or record it as failed
fn settle<T>(section: AuditSection, result: DomainResult<T>, failed: &mut Vec<AuditSection>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(section = %section, error = %e, "audit section failed");
            failed.push(section);
            None
        }
    }
}
