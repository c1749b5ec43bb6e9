//! Audit scoring, recommendations and the rule-based summary

use crate::domain::entities::audit::{AuditReport, AuditSection, Priority, Recommendation};

const ON_PAGE_WEIGHT: f64 = 0.35;
const AUTHORITY_WEIGHT: f64 = 0.25;
const KEYWORD_WEIGHT: f64 = 0.20;
const TRAFFIC_WEIGHT: f64 = 0.20;

const SLOW_LOAD_MS: u64 = 3000;
const THIN_CONTENT_WORDS: u64 = 300;
const FEW_REFERRING_DOMAINS: u64 = 50;
const FEW_KEYWORDS: u64 = 100;

/// 0 at zero, 100 at 100k and above
fn log_scale(value: f64) -> f64 {
    (20.0 * (value.max(0.0) + 1.0).log10()).min(100.0)
}

fn keyword_count(report: &AuditReport) -> Option<u64> {
    report
        .overview
        .as_ref()
        .map(|o| o.organic_keywords)
        .or_else(|| report.keywords.as_ref().map(|k| k.len() as u64))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Weighted average over the sections that are present, 0..=100
pub fn score(report: &AuditReport) -> u8 {
    let mut parts: Vec<(f64, f64)> = Vec::new();

    if let Some(on_page) = &report.on_page {
        parts.push((on_page.onpage_score.clamp(0.0, 100.0), ON_PAGE_WEIGHT));
    }
    if let Some(backlinks) = &report.backlinks {
        parts.push((backlinks.authority(), AUTHORITY_WEIGHT));
    }
    if let Some(count) = keyword_count(report) {
        parts.push((log_scale(count as f64), KEYWORD_WEIGHT));
    }
    if let Some(overview) = &report.overview {
        parts.push((log_scale(overview.organic_traffic), TRAFFIC_WEIGHT));
    }

    let total_weight: f64 = parts.iter().map(|(_, w)| w).sum();
    if total_weight == 0.0 {
        return 0;
    }
    let weighted: f64 = parts.iter().map(|(v, w)| v * w).sum();
    (weighted / total_weight).round().clamp(0.0, 100.0) as u8
}

/// Rule-derived recommendations, highest priority first
pub fn recommendations(report: &AuditReport) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if let Some(page) = &report.on_page {
        if !page.https {
            recs.push(Recommendation::new(
                Priority::High,
                AuditSection::OnPage,
                "Serve the site over HTTPS",
                "Browsers flag plain HTTP pages as not secure and search engines rank them lower.",
            ));
        }
        if is_blank(&page.title) {
            recs.push(Recommendation::new(
                Priority::High,
                AuditSection::OnPage,
                "Add a page title",
                "The homepage has no <title>; it is the headline shown in search results.",
            ));
        }
        if is_blank(&page.meta_description) {
            recs.push(Recommendation::new(
                Priority::High,
                AuditSection::OnPage,
                "Add a meta description",
                "Without one, search engines pick arbitrary page text for the result snippet.",
            ));
        }
        if page.h1_count == 0 {
            recs.push(Recommendation::new(
                Priority::Medium,
                AuditSection::OnPage,
                "Add an H1 heading",
                "A single H1 tells visitors and crawlers what the page is about.",
            ));
        }
        if let Some(ms) = page.load_time_ms.filter(|ms| *ms > SLOW_LOAD_MS) {
            recs.push(Recommendation::new(
                Priority::Medium,
                AuditSection::OnPage,
                "Improve page load time",
                format!(
                    "The page took {:.1}s to load; aim for under {}s.",
                    ms as f64 / 1000.0,
                    SLOW_LOAD_MS / 1000
                ),
            ));
        }
        if page.images_without_alt > 0 {
            recs.push(Recommendation::new(
                Priority::Low,
                AuditSection::OnPage,
                "Add alt text to images",
                format!("{} image(s) have no alt attribute.", page.images_without_alt),
            ));
        }
        if page.word_count < THIN_CONTENT_WORDS {
            recs.push(Recommendation::new(
                Priority::Low,
                AuditSection::OnPage,
                "Expand homepage content",
                format!(
                    "The homepage has {} words; thin pages rarely rank for competitive terms.",
                    page.word_count
                ),
            ));
        }
    }

    if let Some(backlinks) = &report.backlinks {
        if backlinks.referring_domains < FEW_REFERRING_DOMAINS {
            recs.push(Recommendation::new(
                Priority::Medium,
                AuditSection::Backlinks,
                "Build referring domains",
                format!(
                    "Only {} sites link to this domain. Local directories, partners and press are good starting points.",
                    backlinks.referring_domains
                ),
            ));
        }
        if backlinks.broken_backlinks > 0 {
            recs.push(Recommendation::new(
                Priority::Low,
                AuditSection::Backlinks,
                "Reclaim broken backlinks",
                format!(
                    "{} backlinks point at missing pages; redirect them.",
                    backlinks.broken_backlinks
                ),
            ));
        }
    }

    if let Some(count) = keyword_count(report) {
        if count < FEW_KEYWORDS {
            recs.push(Recommendation::new(
                Priority::Medium,
                AuditSection::Keywords,
                "Grow the keyword footprint",
                format!(
                    "The site ranks for {} keywords. Dedicated service and location pages widen that.",
                    count
                ),
            ));
        }
    }

    if let (Some(competitors), Some(overview)) = (&report.competitors, &report.overview) {
        if let Some(leader) = competitors
            .iter()
            .filter(|c| c.organic_traffic > overview.organic_traffic)
            .max_by(|a, b| a.organic_traffic.total_cmp(&b.organic_traffic))
        {
            recs.push(Recommendation::new(
                Priority::Low,
                AuditSection::Competitors,
                format!("Study {}", leader.domain),
                format!(
                    "{} shares {} keywords with you and gets more organic traffic.",
                    leader.domain, leader.intersections
                ),
            ));
        }
    }

    recs.sort_by_key(|r| r.priority);
    recs
}

/// One-paragraph summary used when no generated summary is available
pub fn rule_summary(report: &AuditReport) -> String {
    let name = report.business_name.as_deref().unwrap_or(&report.domain);
    let available = AuditSection::ALL.len() - report.failed_sections.len();
    let high = report.high_priority_count();

    let mut summary = format!(
        "{} scored {}/100 across {} of {} audit sections, with {} recommendation(s) ({} high priority).",
        name,
        report.score,
        available,
        AuditSection::ALL.len(),
        report.recommendations.len(),
        high
    );
    if let Some(first) = report.recommendations.first() {
        summary.push_str(&format!(" Start with: {}.", first.title));
    }
    if !report.failed_sections.is_empty() {
        let failed: Vec<&str> = report.failed_sections.iter().map(|s| s.as_str()).collect();
        summary.push_str(&format!(" Data was unavailable for: {}.", failed.join(", ")));
    }
    summary
}
