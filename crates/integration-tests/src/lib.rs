//! Integration tests for the Lumen storefront.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`.
//! Shopify is replaced by a `wiremock` server and sessions live in a
//! `MemoryStore`, so no database or network access is needed.
//!
//! # Running
//!
//! ```bash
//! cargo test -p lumen-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use lumen_storefront::{
    config::{ShopifyStorefrontConfig, StorefrontConfig},
    middleware::session::SESSION_COOKIE_NAME,
    shopify::StorefrontClient,
    state::AppState,
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use url::form_urlencoded;
use wiremock::MockServer;

/// Storefront token the mock server expects.
pub const TOKEN: &str = "shpat_Qm7xR2kLp9Vz4TnW";

/// Configuration pointing the client at `endpoint`.
#[must_use]
pub fn test_config(endpoint: String) -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://lumen@localhost/lumen_test"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "lumen-test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from(TOKEN),
            endpoint_override: Some(endpoint),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// The storefront router wired to `server`.
#[must_use]
pub fn test_app(server: &MockServer) -> Router {
    test_app_with_health(server, Router::new())
}

/// [`test_app`] with extra state-carrying routes merged in, as `main` does
/// with the readiness check.
#[must_use]
pub fn test_app_with_health(server: &MockServer, health: Router) -> Router {
    let endpoint = format!("{}/api/2026-01/graphql.json", server.uri());
    let client = StorefrontClient::with_endpoint(endpoint.clone(), TOKEN);
    let state = AppState::with_client(test_config(endpoint), client);
    lumen_storefront::app(state, MemoryStore::default(), None, health)
}

/// A response with its body collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    async fn collect(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Self {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// The session cookie pair (`name=value`) set by this response.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")))
            .map(str::to_string)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Browser-like client that carries the session cookie between requests.
pub struct Visitor {
    app: Router,
    cookie: Option<String>,
    htmx: bool,
}

impl Visitor {
    #[must_use]
    pub const fn new(app: Router) -> Self {
        Self {
            app,
            cookie: None,
            htmx: false,
        }
    }

    /// Send `HX-Request: true` on every request.
    #[must_use]
    pub const fn htmx(mut self) -> Self {
        self.htmx = true;
        self
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        if self.htmx {
            builder = builder.header("HX-Request", "true");
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let response = TestResponse::collect(response).await;
        if let Some(cookie) = response.session_cookie() {
            self.cookie = Some(cookie);
        }
        response
    }
}

/// A cart payload as the Storefront API returns it.
#[must_use]
pub fn cart_json(quantity: u32) -> Value {
    let lines = if quantity == 0 {
        json!([])
    } else {
        json!([{
            "id": "gid://shopify/CartLine/l1",
            "quantity": quantity,
            "cost": {
                "amountPerQuantity": { "amount": "24.90", "currencyCode": "EUR" },
                "totalAmount": { "amount": "24.90", "currencyCode": "EUR" },
                "compareAtAmountPerQuantity": null
            },
            "merchandise": {
                "id": "gid://shopify/ProductVariant/11",
                "title": "30 ml",
                "image": null,
                "selectedOptions": [{ "name": "Size", "value": "30 ml" }],
                "product": { "handle": "glow-serum", "title": "Glow Serum" }
            }
        }])
    };
    json!({
        "id": "gid://shopify/Cart/c1?key=k",
        "checkoutUrl": "https://checkout.lumenskin.si/c1",
        "totalQuantity": quantity,
        "note": null,
        "cost": {
            "subtotalAmount": { "amount": "24.90", "currencyCode": "EUR" },
            "totalAmount": { "amount": "24.90", "currencyCode": "EUR" },
            "totalTaxAmount": null
        },
        "discountCodes": [],
        "appliedGiftCards": [],
        "lines": { "nodes": lines }
    })
}
