//! Shopify Storefront API access.
//!
//! Shopify owns inventory, pricing, carts and checkout. The storefront keeps
//! no copy of catalog data; every page reads through [`StorefrontClient`],
//! which caches catalog and content reads for five minutes. Cart reads and
//! mutations always go to Shopify (the last confirmed cart is held by
//! `crate::cart::CartJournal`).
//!
//! ```rust,ignore
//! use lumen_storefront::shopify::{CartLineInput, StorefrontClient};
//!
//! let client = StorefrontClient::new(&config.shopify);
//! let serum = client.get_product_by_handle("glow-serum").await?;
//! let variant = serum.select_variant(&[]).expect("in stock");
//! let cart = client
//!     .create_cart(vec![CartLineInput { merchandise_id: variant.id.clone(), quantity: 1 }])
//!     .await?;
//! ```

mod storefront;
pub mod types;

use std::fmt;

pub use storefront::StorefrontClient;
pub use storefront::queries::ProductSortKeys;
pub use types::*;

use thiserror::Error;

/// Failures talking to the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Top-level GraphQL errors, or a non-success HTTP status.
    #[error("GraphQL errors: {}", describe(.0))]
    GraphQL(Vec<GraphQLError>),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The handle or id resolved to `null`.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 429; seconds from `Retry-After`.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// First `userErrors` message of a cart mutation. Safe to show visitors.
    #[error("User error: {0}")]
    UserError(String),
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    pub message: String,
    pub locations: Vec<GraphQLErrorLocation>,
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }
}

/// 1-based position in the query document.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    pub line: i64,
    pub column: i64,
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .iter()
            .map(|segment| match segment {
                serde_json::Value::String(key) => key.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".");

        let parts: Vec<String> = [
            Some(self.message.clone()).filter(|m| !m.is_empty()),
            Some(path).filter(|p| !p.is_empty()).map(|p| format!("path: {p}")),
            self.locations
                .first()
                .map(|at| format!("at line {}:{}", at.line, at.column)),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            f.write_str("(no details)")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

fn describe(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
