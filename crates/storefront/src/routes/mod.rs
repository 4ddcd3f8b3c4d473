//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                 - Home page
//! GET  /health                           - Liveness
//! GET  /health/ready                     - Readiness (Postgres ping, wired in main)
//!
//! # Catalog
//! GET  /collections                      - Collection listing (4 per page)
//! GET  /collections/all                  - All products (8 per page)
//! GET  /collections/{handle}             - Collection detail (8 per page)
//! GET  /products/{handle}                - Product detail
//! GET  /products/{handle}/testimonials   - Testimonial page fragment (HTMX)
//! GET  /products/{handle}/questions      - Q&A search fragment (HTMX)
//!
//! # Blog
//! GET  /blogs/{blog}                     - Article listing (4 per page)
//! GET  /blogs/{blog}/{article}           - Article
//!
//! # Cart
//! GET  /cart                             - Cart page
//! POST /cart                             - Cart action endpoint (`cart_action` field)
//! GET  /cart/items                       - Cart lines fragment (HTMX)
//! GET  /cart/count                       - Cart count badge fragment (HTMX)
//! GET  /checkout                         - Redirect to Shopify checkout
//!
//! # Quiz
//! GET  /quiz                             - Current step
//! POST /quiz                             - Submit current step
//! POST /quiz/back                        - Previous step
//! POST /quiz/reset                       - Start over
//!
//! # Search and overlays
//! GET  /search                           - Search page
//! GET  /search/predictive                - Predictive results fragment (HTMX)
//! GET  /aside/{kind}                     - Overlay panel (cart, search, mobile, closed)
//! ```

pub mod aside;
pub mod assets;
pub mod blogs;
pub mod cart;
pub mod collections;
pub mod health;
pub mod home;
pub mod products;
pub mod quiz;
pub mod search;

use axum::{
    Router,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
};
use serde::Deserialize;
use url::form_urlencoded;

use crate::error::AppError;
use crate::middleware::RateLimiterLayer;
use crate::shopify::{PageInfo, PageRequest};
use crate::state::AppState;

/// Whether the request was issued by HTMX (`HX-Request: true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get("hx-request")
                .is_some_and(|v| v.as_bytes() == b"true"),
        ))
    }
}

/// Cursor pagination query (`?after=` or `?before=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageQuery {
    /// `before` pages backward; otherwise page forward from `after`.
    #[must_use]
    pub fn request(&self, page_size: i64) -> PageRequest<'_> {
        match self.before.as_deref().filter(|b| !b.is_empty()) {
            Some(before) => PageRequest::from_cursor(page_size, Some(before), true),
            None => PageRequest::from_cursor(page_size, self.after.as_deref(), false),
        }
    }
}

/// Previous/next links for a cursor-paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNav {
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PageNav {
    #[must_use]
    pub fn new(base_path: &str, info: &PageInfo) -> Self {
        let link = |param: &str, cursor: &Option<String>| {
            cursor.as_deref().map(|c| {
                let encoded: String = form_urlencoded::byte_serialize(c.as_bytes()).collect();
                format!("{base_path}?{param}={encoded}")
            })
        };
        Self {
            prev_href: info
                .has_previous_page
                .then(|| link("before", &info.start_cursor))
                .flatten(),
            next_href: info
                .has_next_page
                .then(|| link("after", &info.end_cursor))
                .flatten(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.prev_href.is_none() && self.next_href.is_none()
    }
}

/// Catalog, blog, search and overlay routes.
fn browse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/collections", get(collections::index))
        .route("/collections/all", get(collections::all))
        .route("/collections/{handle}", get(collections::show))
        .route("/products/{handle}", get(products::show))
        .route("/products/{handle}/testimonials", get(products::testimonials))
        .route("/products/{handle}/questions", get(products::questions))
        .route("/blogs/{blog}", get(blogs::show))
        .route("/blogs/{blog}/{article}", get(blogs::article))
        .route("/cart", get(cart::show))
        .route("/cart/items", get(cart::items))
        .route("/cart/count", get(cart::count))
        .route("/checkout", get(cart::checkout))
        .route("/quiz", get(quiz::show))
        .route("/search", get(search::show))
        .route("/search/predictive", get(search::predictive))
        .route("/aside/{kind}", get(aside::show))
}

/// Routes that change cart or quiz state.
fn mutation_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", post(cart::action))
        .route("/quiz", post(quiz::submit))
        .route("/quiz/back", post(quiz::back))
        .route("/quiz/reset", post(quiz::reset))
}

/// All storefront routes.
///
/// `rate_limit` is applied to the mutating routes only; tests pass `None`
/// because requests built in-process carry no client IP.
pub fn routes(rate_limit: Option<RateLimiterLayer>) -> Router<AppState> {
    let mutations = match rate_limit {
        Some(layer) => mutation_routes().layer(layer),
        None => mutation_routes(),
    };

    browse_routes()
        .merge(mutations)
        .route("/health", get(health::health))
        .merge(assets::routes())
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::NotFound("route".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_nav_encodes_cursors() {
        let info = PageInfo {
            has_next_page: true,
            has_previous_page: false,
            start_cursor: Some("start".to_string()),
            end_cursor: Some("eyJsYXN0X2lkIjo0fQ==".to_string()),
        };
        let nav = PageNav::new("/collections/serums", &info);
        assert_eq!(nav.prev_href, None);
        assert_eq!(
            nav.next_href.as_deref(),
            Some("/collections/serums?after=eyJsYXN0X2lkIjo0fQ%3D%3D")
        );
        assert!(PageNav::new("/x", &PageInfo::default()).is_empty());
    }

    #[test]
    fn test_page_query_direction() {
        let forward = PageQuery {
            after: Some("c1".to_string()),
            before: None,
        };
        assert_eq!(
            forward.request(8),
            PageRequest::Forward {
                first: 8,
                after: Some("c1")
            }
        );

        let backward = PageQuery {
            after: Some("ignored".to_string()),
            before: Some("c0".to_string()),
        };
        assert_eq!(
            backward.request(4),
            PageRequest::Backward {
                last: 4,
                before: "c0"
            }
        );

        assert_eq!(
            PageQuery::default().request(4),
            PageRequest::Forward {
                first: 4,
                after: None
            }
        );
    }
}
