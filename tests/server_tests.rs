mod common;

use common::*;

use axum::{body::Body, http::Request};
use http::StatusCode;
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn test_root_liveness() {
    let setup = TestSetup::new();

    let response = setup
        .send_get_request("/")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    assert_eq!(&body[..], b"Hello World!");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let setup = TestSetup::new();

    let request = Request::builder()
        .uri("/api/upload")
        .method("OPTIONS")
        .header("Origin", setup.config.allowed_origin.clone())
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = setup
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some(setup.config.allowed_origin.as_str())
    );
}

#[tokio::test]
async fn test_cors_preflight_rejects_unknown_origin() {
    let setup = TestSetup::new();

    let request = Request::builder()
        .uri("/api/upload")
        .method("OPTIONS")
        .header("Origin", "http://evil.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = setup
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    // No allow-origin header for origins outside the allow-list
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
