//! The skincare quiz driven through the session cookie.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use lumen_core::SkinType;
use lumen_integration_tests::{Visitor, test_app};
use wiremock::MockServer;

#[tokio::test]
async fn test_plain_form_posts_redirect_and_persist_progress() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server));

    let splash = visitor.get("/quiz").await;
    assert_eq!(splash.status, StatusCode::OK);
    assert!(splash.body.contains("Find your routine"));

    let started = visitor.post_form("/quiz", &[("step", "1")]).await;
    assert_eq!(started.status, StatusCode::SEE_OTHER);
    assert_eq!(started.header(header::LOCATION.as_str()), Some("/quiz"));

    let page = visitor.get("/quiz").await;
    assert!(page.body.contains("What is your skin type?"));
}

#[tokio::test]
async fn test_missing_answer_is_unprocessable_and_keeps_step() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();
    visitor.post_form("/quiz", &[("step", "1")]).await;

    let response = visitor.post_form("/quiz", &[("step", "2")]).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("What is your skin type?"));
    assert!(response.body.contains("field-error"));
}

#[tokio::test]
async fn test_stale_step_rerenders_current_step() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();
    visitor.post_form("/quiz", &[("step", "1")]).await;

    // A second tab posting the splash again.
    let response = visitor.post_form("/quiz", &[("step", "1")]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("What is your skin type?"));
}

#[tokio::test]
async fn test_sensitive_skin_skips_exfoliation_and_back_returns() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();
    visitor.post_form("/quiz", &[("step", "1")]).await;

    let sensitive = SkinType::Sensitive.as_str();
    let next = visitor
        .post_form("/quiz", &[("step", "2"), ("skin_type", sensitive)])
        .await;
    assert_eq!(next.status, StatusCode::OK);
    assert!(next.body.contains("How old are you?"));
    assert!(!next.body.contains("How do you exfoliate?"));

    let back = visitor.post_form("/quiz/back", &[]).await;
    assert!(back.body.contains("What is your skin type?"));
    assert!(back.body.contains(&format!("value=\"{sensitive}\" checked")));
}

#[tokio::test]
async fn test_reset_returns_to_splash() {
    let server = MockServer::start().await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();
    visitor.post_form("/quiz", &[("step", "1")]).await;
    visitor
        .post_form("/quiz", &[("step", "2"), ("skin_type", "DRY")])
        .await;

    let reset = visitor.post_form("/quiz/reset", &[]).await;

    assert_eq!(reset.status, StatusCode::OK);
    assert!(reset.body.contains("Find your routine"));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let server = MockServer::start().await;
    let app = test_app(&server);
    let mut first = Visitor::new(app.clone());
    let mut second = Visitor::new(app);

    first.post_form("/quiz", &[("step", "1")]).await;

    assert!(second.get("/quiz").await.body.contains("Find your routine"));
}
