//! Product pages and their metafield-driven sections.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use lumen_integration_tests::{Visitor, test_app};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn metafield(value: &str) -> Value {
    json!({ "value": value })
}

fn product_json(faq: Value, q_a: Value, features: Value, testimonials: Value) -> Value {
    let eur = |amount: &str| json!({ "amount": amount, "currencyCode": "EUR" });
    json!({
        "id": "gid://shopify/Product/1",
        "handle": "glow-serum",
        "title": "Glow Serum",
        "availableForSale": true,
        "priceRange": { "minVariantPrice": eur("24.90") },
        "compareAtPriceRange": null,
        "featuredImage": null,
        "description": "Brightening vitamin C serum",
        "descriptionHtml": "<p>Brightening vitamin C serum</p>",
        "vendor": "Lumen",
        "productType": "Serum",
        "tags": [],
        "images": { "nodes": [] },
        "options": [{ "name": "Size", "optionValues": [{ "name": "30 ml" }] }],
        "variants": { "nodes": [{
            "id": "gid://shopify/ProductVariant/11",
            "title": "30 ml",
            "availableForSale": true,
            "sku": "GS-30",
            "price": eur("24.90"),
            "compareAtPrice": null,
            "selectedOptions": [{ "name": "Size", "value": "30 ml" }],
            "image": null
        }] },
        "seo": { "title": null, "description": null },
        "faq": faq,
        "q_a": q_a,
        "product_features": features,
        "testimonials": testimonials
    })
}

async fn mock_product(server: &MockServer, product: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "ProductByHandle",
            "variables": { "handle": "glow-serum" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": product } })),
        )
        .mount(server)
        .await;
}

/// Eight reviews dated January 1st to 8th; the two oldest rated 4 stars.
fn reviews() -> Value {
    let items: Vec<Value> = (1..=8)
        .map(|day| {
            json!({
                "name": format!("Reviewer {day}"),
                "content": format!("Review number {day}"),
                "createdAt": format!("2026-01-0{day}"),
                "rating": if day <= 2 { json!(4) } else { Value::Null }
            })
        })
        .collect();
    metafield(&Value::Array(items).to_string())
}

#[tokio::test]
async fn test_broken_metafields_leave_sections_out() {
    let server = MockServer::start().await;
    mock_product(
        &server,
        product_json(
            metafield("not json"),
            metafield("{"),
            metafield("[1, 2"),
            metafield(r#"{"content": 5}"#),
        ),
    )
    .await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/products/glow-serum").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Glow Serum"));
    assert!(!response.body.contains("class=\"faq\""));
    assert!(!response.body.contains("class=\"questions\""));
    assert!(!response.body.contains("id=\"reviews\""));
    assert!(!response.body.contains("featured-testimonials"));
}

#[tokio::test]
async fn test_content_sections_render_from_metafields() {
    let server = MockServer::start().await;
    mock_product(
        &server,
        product_json(
            metafield(r#"[{"question":"How often should I apply it?","answer":"Every morning.","order":1}]"#),
            metafield(
                r#"[{"question":"Safe with retinol?","askedBy":"Maja","createdAt":"2026-02-01T10:00:00Z",
                    "answers":[{"answerType":"official","content":"Yes, on alternate nights."}]}]"#,
            ),
            Value::Null,
            reviews(),
        ),
    )
    .await;
    let mut visitor = Visitor::new(test_app(&server));

    let response = visitor.get("/products/glow-serum").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("How often should I apply it?"));
    assert!(response.body.contains("Safe with retinol?"));
    assert!(response.body.contains("Asked by Maja"));
    assert!(response.body.contains("Based on 8 reviews"));
    assert!(response.body.contains("Page 1 of 2"));
}

#[tokio::test]
async fn test_testimonial_pages_and_rating_filter() {
    let server = MockServer::start().await;
    mock_product(
        &server,
        product_json(Value::Null, Value::Null, Value::Null, reviews()),
    )
    .await;
    let mut visitor = Visitor::new(test_app(&server)).htmx();

    let second = visitor
        .get("/products/glow-serum/testimonials?page=2&rating=")
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert!(second.body.contains("Page 2 of 2"));
    assert!(second.body.contains("Review number 1"));
    assert!(!second.body.contains("Review number 8"));

    let four_stars = visitor
        .get("/products/glow-serum/testimonials?rating=4")
        .await;
    assert_eq!(four_stars.status, StatusCode::OK);
    assert!(four_stars.body.contains("Review number 2"));
    assert!(!four_stars.body.contains("Review number 3"));
    assert!(!four_stars.body.contains("Page 1 of"));
    assert!(four_stars.body.contains("All ratings"));

    let none = visitor
        .get("/products/glow-serum/testimonials?rating=3&page=9")
        .await;
    assert_eq!(none.status, StatusCode::OK);
    assert!(none.body.contains("No reviews match this rating."));
}
