//! Search route handlers.
//!
//! Both the page and the HTMX fragment are backed by Shopify predictive
//! search. A blank query renders the empty state without calling Shopify.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::PredictiveSearchResult;
use crate::state::AppState;

/// Results per resource type.
pub const SEARCH_LIMIT: i64 = 6;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

impl SearchQuery {
    /// The trimmed term, or `None` when blank.
    fn term(&self) -> Option<&str> {
        Some(self.q.trim()).filter(|q| !q.is_empty())
    }
}

/// Full search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search/show.html")]
pub struct SearchPageTemplate {
    pub nonce: String,
    pub query: String,
    pub results: PredictiveSearchResult,
}

/// Predictive results fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "search/predictive.html")]
pub struct PredictiveTemplate {
    pub query: String,
    pub results: PredictiveSearchResult,
}

async fn lookup(state: &AppState, query: &SearchQuery) -> Result<PredictiveSearchResult> {
    match query.term() {
        Some(term) => Ok(state
            .storefront()
            .predictive_search(term, SEARCH_LIMIT)
            .await?),
        None => Ok(PredictiveSearchResult::default()),
    }
}

/// Display the search page.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let results = lookup(&state, &query).await?;
    Ok(SearchPageTemplate {
        nonce,
        query: query.q.trim().to_string(),
        results,
    })
}

/// Predictive results as the visitor types.
#[instrument(skip(state))]
pub async fn predictive(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let results = lookup(&state, &query).await?;
    Ok(PredictiveTemplate {
        query: query.q.trim().to_string(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_terms_are_skipped() {
        let blank = SearchQuery {
            q: "   ".to_string(),
        };
        assert_eq!(blank.term(), None);
        assert_eq!(SearchQuery::default().term(), None);

        let query = SearchQuery {
            q: " serum ".to_string(),
        };
        assert_eq!(query.term(), Some("serum"));
    }
}
