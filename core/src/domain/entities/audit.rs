//! SEO audit entities
//!
//! An audit is assembled from five independent provider sections. Any of
//! them may be missing; the report records which ones failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Audit request as submitted by the site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
}

/// The independent sections of an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSection {
    Overview,
    Backlinks,
    Keywords,
    OnPage,
    Competitors,
}

impl AuditSection {
    pub const ALL: [AuditSection; 5] = [
        AuditSection::Overview,
        AuditSection::Backlinks,
        AuditSection::Keywords,
        AuditSection::OnPage,
        AuditSection::Competitors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditSection::Overview => "overview",
            AuditSection::Backlinks => "backlinks",
            AuditSection::Keywords => "keywords",
            AuditSection::OnPage => "on_page",
            AuditSection::Competitors => "competitors",
        }
    }
}

impl fmt::Display for AuditSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Complete,
    Partial,
}

/// Organic search footprint of a domain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainOverview {
    pub organic_keywords: u64,
    /// Estimated monthly organic traffic
    pub organic_traffic: f64,
    /// Estimated monthly cost of that traffic in paid search
    pub organic_traffic_cost: f64,
    pub paid_keywords: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkSummary {
    /// Provider authority rank, 0..=1000
    pub rank: u32,
    pub backlinks: u64,
    pub referring_domains: u64,
    pub broken_backlinks: u64,
}

impl BacklinkSummary {
    /// Authority on a 0..=100 scale
    pub fn authority(&self) -> f64 {
        (f64::from(self.rank) / 10.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedKeyword {
    pub keyword: String,
    pub position: u32,
    pub search_volume: u64,
    pub url: Option<String>,
}

/// Single-page technical check of the homepage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnPageResult {
    /// Provider on-page score, 0..=100
    pub onpage_score: f64,
    pub status_code: Option<u16>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: u32,
    pub word_count: u64,
    pub images_without_alt: u32,
    pub https: bool,
    pub load_time_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub domain: String,
    /// Keywords both domains rank for
    pub intersections: u64,
    pub organic_traffic: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub section: AuditSection,
    pub title: String,
    pub detail: String,
}

impl Recommendation {
    pub fn new(
        priority: Priority,
        section: AuditSection,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            priority,
            section,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// Assembled audit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub id: Uuid,
    pub domain: String,
    pub url: String,
    pub business_name: Option<String>,
    pub status: AuditStatus,
    pub score: u8,
    pub overview: Option<DomainOverview>,
    pub backlinks: Option<BacklinkSummary>,
    pub keywords: Option<Vec<RankedKeyword>>,
    pub on_page: Option<OnPageResult>,
    pub competitors: Option<Vec<Competitor>>,
    pub failed_sections: Vec<AuditSection>,
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
    /// Whether `summary` was written by the insight generator
    pub ai_summary: bool,
    pub generated_at: DateTime<Utc>,
}

impl AuditReport {
    /// Empty report for a domain; sections are filled in by the service
    pub fn new(domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            id: Uuid::new_v4(),
            url: format!("https://{}", domain),
            domain,
            business_name: None,
            status: AuditStatus::Complete,
            score: 0,
            overview: None,
            backlinks: None,
            keywords: None,
            on_page: None,
            competitors: None,
            failed_sections: Vec::new(),
            recommendations: Vec::new(),
            summary: String::new(),
            ai_summary: false,
            generated_at: Utc::now(),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.status == AuditStatus::Partial
    }

    pub fn high_priority_count(&self) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count()
    }
}
