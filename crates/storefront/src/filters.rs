//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::Utc;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(Utc::now().year())
}

/// Returns the content hash for main.css, computed by the build script.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Shopify CDN image URL resized to 600px wide for cards.
///
/// Usage in templates: `{{ image.url|card_image }}`
#[askama::filter_fn]
pub fn card_image(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(sized_image_url(&url.to_string(), 600))
}

/// Append Shopify's `width` transform to a CDN URL.
#[must_use]
pub fn sized_image_url(url: &str, width: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}width={width}")
}
