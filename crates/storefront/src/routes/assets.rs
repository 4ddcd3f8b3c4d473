//! Static assets.
//!
//! The stylesheet is compiled in and served under a content-hashed name so
//! it can be cached forever; everything else comes from `static/`.

use axum::{
    Router,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

const MAIN_CSS: &str = include_str!("../../static/css/main.css");

/// Path of the hashed stylesheet, matching the `css_hash` template filter.
pub const MAIN_CSS_PATH: &str = concat!("/static/css/main.", env!("CSS_HASH"), ".css");

async fn main_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        MAIN_CSS,
    )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(MAIN_CSS_PATH, get(main_css))
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
}
