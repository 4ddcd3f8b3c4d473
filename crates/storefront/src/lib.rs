//! Lumen storefront library.
//!
//! Server-rendered skincare storefront in front of the Shopify Storefront
//! API: catalog and blog pages, an optimistic cart, the skincare quiz, and
//! predictive search. Exposed as a library so the router can be driven
//! in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod metafields;
pub mod middleware;
pub mod models;
pub mod quiz;
pub mod routes;
pub mod shopify;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::middleware::{
    RateLimiterLayer, create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the full application router with its middleware stack.
///
/// `health` carries routes with their own state (the readiness check); they
/// get every layer except the session.
///
/// Layers, outermost first: Sentry hub and transaction, request trace span,
/// request ID, security headers with the CSP nonce, session.
pub fn app<S>(
    state: AppState,
    store: S,
    rate_limit: Option<RateLimiterLayer>,
    health: Router,
) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(store, state.config());

    routes::routes(rate_limit)
        .layer(session_layer)
        .with_state(state)
        .merge(health)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
        .layer(sentry_tower::NewSentryLayer::new_from_top())
}
