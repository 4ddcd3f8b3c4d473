//! Security headers for every response, including the per-request CSP nonce.
//!
//! The middleware mints a nonce, hands it to handlers through request
//! extensions (templates render it into inline `<script nonce="...">` tags)
//! and builds the `Content-Security-Policy` header from the same value. The
//! CSP allows Shopify CDN images and video, HTMX from unpkg, and inline
//! scripts carrying the nonce. Everything else is same-origin.

use axum::{
    extract::{FromRequestParts, Request},
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Nonce for inline scripts on the current page, base64 of 16 random bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CspNonce(pub String);

impl CspNonce {
    fn mint() -> Self {
        Self(STANDARD.encode(rand::random::<[u8; 16]>()))
    }
}

impl<S> FromRequestParts<S> for CspNonce
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_else(|| {
            tracing::warn!("Route served outside security_headers_middleware; no CSP nonce");
            Self(String::new())
        }))
    }
}

/// Build the CSP header value for a nonce.
#[must_use]
pub fn content_security_policy(nonce: &str) -> String {
    format!(
        "default-src 'none'; \
         script-src 'self' 'nonce-{nonce}' https://unpkg.com; \
         style-src 'self'; \
         font-src 'self'; \
         img-src 'self' data: https://cdn.shopify.com; \
         media-src 'self' https://cdn.shopify.com; \
         connect-src 'self'; \
         frame-src 'none'; \
         object-src 'none'; \
         base-uri 'self'; \
         form-action 'self' https://*.myshopify.com https://shop.app; \
         frame-ancestors 'none'"
    )
}

/// Mint the request's CSP nonce and add security headers to the response.
pub async fn security_headers_middleware(mut request: Request, next: Next) -> Response {
    let nonce = CspNonce::mint();
    let policy = HeaderValue::from_str(&content_security_policy(&nonce.0));
    request.extensions_mut().insert(nonce);

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(
        REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if let Ok(value) = policy {
        headers.insert(CONTENT_SECURITY_POLICY, value);
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), geolocation=(), microphone=(), payment=(), usb=(), interest-cohort=()",
        ),
    );

    // Pages carry per-visitor cart state; static assets set their own policy.
    if !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    }

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn test_policy_allows_shopify_media() {
        let csp = content_security_policy("abc");
        assert!(csp.contains("'nonce-abc'"));
        assert!(csp.contains("img-src 'self' data: https://cdn.shopify.com"));
        assert!(csp.contains("media-src 'self' https://cdn.shopify.com"));
    }

    #[test]
    fn test_minted_nonces_differ_and_hold_16_bytes() {
        let a = CspNonce::mint();
        let b = CspNonce::mint();
        assert_ne!(a, b);
        assert_eq!(STANDARD.decode(&a.0).map(|v| v.len()).ok(), Some(16));
    }

    async fn nonce_and_policy(app: Router) -> (String, String) {
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let csp = response
            .headers()
            .get(CONTENT_SECURITY_POLICY)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        (String::from_utf8(body.to_vec()).unwrap(), csp)
    }

    #[tokio::test]
    async fn test_header_uses_request_nonce() {
        let app = Router::new()
            .route("/", get(|CspNonce(n): CspNonce| async move { n }))
            .layer(middleware::from_fn(security_headers_middleware));

        let (first, csp) = nonce_and_policy(app.clone()).await;
        assert!(!first.is_empty());
        assert!(csp.contains(&format!("'nonce-{first}'")));

        let (second, _) = nonce_and_policy(app).await;
        assert_ne!(first, second);
    }
}
