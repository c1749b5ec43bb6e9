//! Unit tests for the places service

use std::sync::Arc;

use crate::errors::DomainError;
use crate::services::places::PlacesService;

use super::mocks::MockPlacesProvider;

#[tokio::test]
async fn test_autocomplete_trims_input() {
    let provider = Arc::new(MockPlacesProvider::new(false));
    let service = PlacesService::new(provider.clone());

    let predictions = service.autocomplete("  Acme ", Some("sess-1")).await.unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].main_text, "Acme Coffee");

    let calls = provider.calls.lock().unwrap();
    assert_eq!(calls[0], ("Acme".to_string(), Some("sess-1".to_string())));
}

#[tokio::test]
async fn test_autocomplete_rejects_bad_input() {
    let provider = Arc::new(MockPlacesProvider::new(false));
    let service = PlacesService::new(provider.clone());

    assert!(matches!(
        service.autocomplete(" a ", None).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        service.autocomplete(&"a".repeat(201), None).await,
        Err(DomainError::Validation { .. })
    ));
    let long_token = "t".repeat(129);
    match service.autocomplete("Acme", Some(&long_token)).await.unwrap_err() {
        DomainError::Validation { field, .. } => assert_eq!(field, "sessionToken"),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_empty_session_token_is_dropped() {
    let provider = Arc::new(MockPlacesProvider::new(false));
    let service = PlacesService::new(provider.clone());

    service.autocomplete("Acme", Some("  ")).await.unwrap();
    assert_eq!(provider.calls.lock().unwrap()[0].1, None);
}

#[tokio::test]
async fn test_autocomplete_propagates_upstream_error() {
    let service = PlacesService::new(Arc::new(MockPlacesProvider::new(true)));
    assert!(matches!(
        service.autocomplete("Acme", None).await,
        Err(DomainError::Upstream { .. })
    ));
}

#[tokio::test]
async fn test_details_validates_place_id() {
    let provider = Arc::new(MockPlacesProvider::new(false));
    let service = PlacesService::new(provider.clone());

    let too_long = "x".repeat(301);
    for bad in ["", "   ", "abc def", "id;drop", too_long.as_str()] {
        assert!(
            matches!(service.details(bad, None).await, Err(DomainError::Validation { .. })),
            "expected {:?} to be rejected",
            bad
        );
    }
    assert_eq!(provider.call_count(), 0);

    let details = service.details("ChIJ-abc_123", None).await.unwrap();
    assert_eq!(details.place_id, "ChIJ-abc_123");
}

#[tokio::test]
async fn test_details_not_found() {
    let service = PlacesService::new(Arc::new(MockPlacesProvider::new(false)));
    assert!(matches!(
        service.details("missing", None).await,
        Err(DomainError::NotFound { .. })
    ));
}
