//! `/api/context/*`

mod mocks;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

use mocks::{TestHarness, ADMIN_TOKEN};
use ns_api::create_app;

#[actix_web::test]
async fn test_list_sources() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/context").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["sources"], json!(["blog", "github"]));
    assert_eq!(body["data"]["contexts"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_unknown_source_is_not_found() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/context/twitter").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_second_read_is_served_from_cache() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/context/github").to_request(),
    )
    .await;
    assert_eq!(first["data"]["fromCache"], false);
    assert_eq!(first["data"]["content"], "- site: Agency website");

    let second: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/context/github").to_request(),
    )
    .await;
    assert_eq!(second["data"]["fromCache"], true);
    assert_eq!(h.github.fetches.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn test_failing_fetch_serves_fallback() {
    let h = TestHarness::new();
    h.blog.set_should_fail(true);
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/context/blog").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["fallback"], true);
    assert_eq!(body["data"]["content"], "blog fallback");
}

#[actix_web::test]
async fn test_refresh_requires_admin_token() {
    let h = TestHarness::new();
    let app = test::init_service(create_app(h.state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/context/refresh").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(h.github.fetches.load(Ordering::SeqCst), 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/context/refresh?source=github")
            .insert_header(("Authorization", format!("Bearer {}", ADMIN_TOKEN)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(h.github.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(h.blog.fetches.load(Ordering::SeqCst), 0);
}
