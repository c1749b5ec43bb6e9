//! Mock SEO provider and insight generator

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::audit::*;
use crate::errors::{DomainError, DomainResult};
use crate::services::audit::{InsightGenerator, SeoDataProvider};

pub struct MockSeoProvider {
    pub failing: HashSet<AuditSection>,
    pub delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockSeoProvider {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(sections: &[AuditSection]) -> Self {
        Self {
            failing: sections.iter().copied().collect(),
            ..Self::new()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    async fn enter(&self, section: AuditSection, target: &str) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", section, target));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&section) {
            return Err(DomainError::upstream("DataForSEO", format!("{} unavailable", section)));
        }
        Ok(())
    }
}

#[async_trait]
impl SeoDataProvider for MockSeoProvider {
    async fn domain_overview(&self, domain: &str) -> DomainResult<DomainOverview> {
        self.enter(AuditSection::Overview, domain).await?;
        Ok(DomainOverview {
            organic_keywords: 40,
            organic_traffic: 320.0,
            organic_traffic_cost: 410.5,
            paid_keywords: 0,
        })
    }

    async fn backlinks_summary(&self, domain: &str) -> DomainResult<BacklinkSummary> {
        self.enter(AuditSection::Backlinks, domain).await?;
        Ok(BacklinkSummary {
            rank: 210,
            backlinks: 350,
            referring_domains: 18,
            broken_backlinks: 2,
        })
    }

    async fn ranked_keywords(&self, domain: &str, limit: u32) -> DomainResult<Vec<RankedKeyword>> {
        self.enter(AuditSection::Keywords, domain).await?;
        Ok((0..limit.min(3))
            .map(|i| RankedKeyword {
                keyword: format!("dentist austin {}", i),
                position: 4 + i,
                search_volume: 1000,
                url: None,
            })
            .collect())
    }

    async fn on_page(&self, url: &str) -> DomainResult<OnPageResult> {
        self.enter(AuditSection::OnPage, url).await?;
        Ok(OnPageResult {
            onpage_score: 72.0,
            status_code: Some(200),
            title: Some("Acme Dental".to_string()),
            meta_description: None,
            h1_count: 1,
            word_count: 850,
            images_without_alt: 0,
            https: true,
            load_time_ms: Some(1200),
        })
    }

    async fn competitors(&self, domain: &str, _limit: u32) -> DomainResult<Vec<Competitor>> {
        self.enter(AuditSection::Competitors, domain).await?;
        Ok(vec![Competitor {
            domain: "rival-dental.com".to_string(),
            intersections: 25,
            organic_traffic: 2400.0,
        }])
    }
}

pub struct MockInsight {
    pub should_fail: bool,
}

#[async_trait]
impl InsightGenerator for MockInsight {
    async fn summarize(&self, report: &AuditReport) -> DomainResult<String> {
        if self.should_fail {
            return Err(DomainError::Configuration {
                message: "OPENAI_API_KEY is not set".to_string(),
            });
        }
        Ok(format!("  {} has room to grow.  ", report.domain))
    }
}
