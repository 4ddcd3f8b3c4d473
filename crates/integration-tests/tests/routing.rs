//! Routing, error pages and response headers.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum::{Router, extract::State, routing::get};
use lumen_integration_tests::{Visitor, test_app, test_app_with_health};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_health_is_ok_without_shopify() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/wishlist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page not found"));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ProductByHandle",
            "variables": { "handle": "discontinued-toner" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/products/discontinued-toner").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_aside_is_not_found() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();

    assert_eq!(visitor.get("/aside/wishlist").await.status, StatusCode::NOT_FOUND);
    assert_eq!(visitor.get("/aside/search").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_blank_search_does_not_call_shopify() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/search?q=%20%20").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pages_carry_security_headers_and_request_id() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/quiz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert!(response.header("x-request-id").is_some());
    let csp = response.header("content-security-policy").unwrap();
    assert!(csp.contains("'nonce-"));
}

#[tokio::test]
async fn test_readiness_route_gets_the_middleware_stack() {
    let server = MockServer::start().await;
    let ready = Router::new()
        .route(
            "/health/ready",
            get(|State(ready): State<bool>| async move {
                if ready {
                    StatusCode::OK
                } else {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }),
        )
        .with_state(true);
    let mut visitor = Visitor::new(test_app_with_health(&server, ready));

    let response = visitor.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert!(response.header("x-request-id").is_some());
    assert!(response.session_cookie().is_none());
}
