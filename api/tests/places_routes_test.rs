//! `GET /api/places/*`

mod mocks;

use actix_web::{http::StatusCode, test};
use serde_json::Value;
use std::sync::atomic::Ordering;

use mocks::{TestHarness, KNOWN_PLACE_ID};
use ns_api::create_app;

#[actix_web::test]
async fn test_autocomplete_returns_predictions() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/places/autocomplete?input=Sunrise&sessionToken=abc123")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let predictions = body["data"]["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0]["placeId"], KNOWN_PLACE_ID);
    assert_eq!(predictions[0]["mainText"], "Sunrise Bakery");
}

#[actix_web::test]
async fn test_autocomplete_short_input_never_reaches_provider() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    for uri in ["/api/places/autocomplete?input=a", "/api/places/autocomplete"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(h.places.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_details_known_and_unknown() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/places/details?placeId={}", KNOWN_PLACE_ID))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["place"]["name"], "Sunrise Bakery");
    assert_eq!(body["data"]["place"]["location"]["lat"], 39.7392);

    let req = test::TestRequest::get()
        .uri("/api/places/details?placeId=ChIJunknown")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_details_rejects_malformed_place_id() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/places/details?placeId=bad%20id%21")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["field"], "placeId");
}

#[actix_web::test]
async fn test_provider_failure_is_bad_gateway() {
    let h = TestHarness::new();
    h.places.set_should_fail(true);
    let app = test::init_service(create_app(h.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/places/autocomplete?input=Sunrise")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
