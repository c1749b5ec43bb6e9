//! Tests for audit scoring and recommendations

use crate::domain::entities::audit::*;
use crate::services::audit::{recommendations, rule_summary, score};

fn on_page(score: f64) -> OnPageResult {
    OnPageResult {
        onpage_score: score,
        status_code: Some(200),
        title: Some("Home".to_string()),
        meta_description: Some("We fix teeth.".to_string()),
        h1_count: 1,
        word_count: 900,
        images_without_alt: 0,
        https: true,
        load_time_ms: Some(800),
    }
}

#[test]
fn test_empty_report_scores_zero() {
    assert_eq!(score(&AuditReport::new("acme.com")), 0);
}

#[test]
fn test_score_uses_only_present_sections() {
    let mut report = AuditReport::new("acme.com");
    report.on_page = Some(on_page(80.0));
    assert_eq!(score(&report), 80);

    report.backlinks = Some(BacklinkSummary {
        rank: 400,
        ..Default::default()
    });
    // (80 * 0.35 + 40 * 0.25) / 0.6
    assert_eq!(score(&report), 63);
}

#[test]
fn test_score_caps_large_footprints() {
    let mut report = AuditReport::new("big.com");
    report.overview = Some(DomainOverview {
        organic_keywords: 5_000_000,
        organic_traffic: 9_000_000.0,
        ..Default::default()
    });
    assert_eq!(score(&report), 100);
}

#[test]
fn test_healthy_page_has_no_on_page_recommendations() {
    let mut report = AuditReport::new("acme.com");
    report.on_page = Some(on_page(90.0));
    assert!(recommendations(&report).is_empty());
}

#[test]
fn test_recommendations_are_rule_based_and_sorted() {
    let mut report = AuditReport::new("acme.com");
    report.on_page = Some(OnPageResult {
        https: false,
        meta_description: None,
        images_without_alt: 3,
        load_time_ms: Some(4500),
        ..on_page(40.0)
    });
    report.backlinks = Some(BacklinkSummary {
        referring_domains: 5,
        ..Default::default()
    });
    report.keywords = Some(vec![]);

    let recs = recommendations(&report);
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"Serve the site over HTTPS"));
    assert!(titles.contains(&"Add a meta description"));
    assert!(titles.contains(&"Improve page load time"));
    assert!(titles.contains(&"Add alt text to images"));
    assert!(titles.contains(&"Build referring domains"));
    assert!(titles.contains(&"Grow the keyword footprint"));

    let priorities: Vec<Priority> = recs.iter().map(|r| r.priority).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    assert_eq!(recs[0].priority, Priority::High);
}

#[test]
fn test_stronger_competitor_is_flagged() {
    let mut report = AuditReport::new("acme.com");
    report.overview = Some(DomainOverview {
        organic_keywords: 500,
        organic_traffic: 100.0,
        ..Default::default()
    });
    report.competitors = Some(vec![
        Competitor {
            domain: "small.com".to_string(),
            intersections: 3,
            organic_traffic: 50.0,
        },
        Competitor {
            domain: "leader.com".to_string(),
            intersections: 40,
            organic_traffic: 9000.0,
        },
    ]);

    let recs = recommendations(&report);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].title, "Study leader.com");
}

#[test]
fn test_rule_summary_mentions_failures() {
    let mut report = AuditReport::new("acme.com");
    report.score = 55;
    report.failed_sections = vec![AuditSection::Backlinks];
    report.recommendations = vec![Recommendation::new(
        Priority::High,
        AuditSection::OnPage,
        "Add a meta description",
        "",
    )];

    let summary = rule_summary(&report);
    assert!(summary.starts_with("acme.com scored 55/100 across 4 of 5 audit sections"));
    assert!(summary.contains("Start with: Add a meta description."));
    assert!(summary.contains("Data was unavailable for: backlinks."));
}
