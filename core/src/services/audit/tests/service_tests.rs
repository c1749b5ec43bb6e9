//! Unit tests for the audit service

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::audit::{AuditRequest, AuditSection, AuditStatus};
use crate::errors::DomainError;
use crate::services::audit::{AuditService, AuditServiceConfig};

use super::mocks::{MockInsight, MockSeoProvider};

fn request(url: &str) -> AuditRequest {
    AuditRequest {
        url: url.to_string(),
        email: None,
        business_name: None,
    }
}

fn service(seo: MockSeoProvider, insight_fails: bool) -> AuditService<MockSeoProvider, MockInsight> {
    AuditService::new(
        Arc::new(seo),
        Arc::new(MockInsight {
            should_fail: insight_fails,
        }),
        AuditServiceConfig::default(),
    )
}

#[tokio::test]
async fn test_complete_audit() {
    let seo = MockSeoProvider::new();
    let calls = seo.calls.clone();
    let service = service(seo, false);

    let report = service
        .generate(request("https://www.Acme-Dental.com/about?ref=ad"))
        .await
        .unwrap();

    assert_eq!(report.domain, "acme-dental.com");
    assert_eq!(report.url, "https://acme-dental.com");
    assert_eq!(report.status, AuditStatus::Complete);
    assert!(report.failed_sections.is_empty());
    assert!(report.overview.is_some() && report.competitors.is_some());
    assert_eq!(report.keywords.as_ref().map(Vec::len), Some(3));
    assert!(report.score > 0 && report.score <= 100);
    assert!(report.ai_summary);
    assert_eq!(report.summary, "acme-dental.com has room to grow.");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 5);
    assert!(calls.contains(&"on_page:https://acme-dental.com".to_string()));
}

#[tokio::test]
async fn test_partial_audit_when_sections_fail() {
    let service = service(
        MockSeoProvider::failing(&[AuditSection::Backlinks, AuditSection::Competitors]),
        false,
    );

    let report = service.generate(request("acme-dental.com")).await.unwrap();
    assert_eq!(report.status, AuditStatus::Partial);
    assert!(report.is_partial());
    assert_eq!(
        report.failed_sections,
        vec![AuditSection::Backlinks, AuditSection::Competitors]
    );
    assert!(report.backlinks.is_none());
    assert!(report.on_page.is_some());
}

#[tokio::test]
async fn test_all_sections_failing_is_upstream_error() {
    let service = service(MockSeoProvider::failing(&AuditSection::ALL), false);

    let result = service.generate(request("acme-dental.com")).await;
    assert!(matches!(result, Err(DomainError::Upstream { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_fan_out_timeout() {
    let service = AuditService::new(
        Arc::new(MockSeoProvider::slow(Duration::from_secs(60))),
        Arc::new(MockInsight { should_fail: false }),
        AuditServiceConfig {
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
    );

    match service.generate(request("acme-dental.com")).await {
        Err(DomainError::Timeout { operation }) => assert_eq!(operation, "audit generation"),
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_calls_run_concurrently() {
    // Five 4s calls finish inside a 5s deadline only if they overlap
    let service = AuditService::new(
        Arc::new(MockSeoProvider::slow(Duration::from_secs(4))),
        Arc::new(MockInsight { should_fail: false }),
        AuditServiceConfig {
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
    );

    let report = service.generate(request("acme-dental.com")).await.unwrap();
    assert_eq!(report.status, AuditStatus::Complete);
}

#[tokio::test]
async fn test_insight_failure_falls_back_to_rule_summary() {
    let service = service(MockSeoProvider::new(), true);

    let mut req = request("acme-dental.com");
    req.business_name = Some("Acme <b>Dental</b>".to_string());
    let report = service.generate(req).await.unwrap();

    assert!(!report.ai_summary);
    assert_eq!(report.business_name.as_deref(), Some("Acme Dental"));
    assert!(report.summary.starts_with("Acme Dental scored"));
}

#[tokio::test]
async fn test_invalid_input() {
    let seo = MockSeoProvider::new();
    let calls = seo.calls.clone();
    let service = service(seo, false);

    for bad in ["", "not a url", "localhost", "http://"] {
        match service.generate(request(bad)).await {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "url"),
            other => panic!("Expected url validation error for {:?}, got {:?}", bad, other),
        }
    }

    let mut req = request("acme-dental.com");
    req.email = Some("nope".to_string());
    match service.generate(req).await {
        Err(DomainError::Validation { field, .. }) => assert_eq!(field, "email"),
        other => panic!("Expected email validation error, got {:?}", other),
    }

    assert!(calls.lock().unwrap().is_empty());
}
