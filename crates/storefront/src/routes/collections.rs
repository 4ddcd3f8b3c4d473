//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use super::{PageNav, PageQuery};
use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::{Collection, Product};
use crate::state::AppState;

/// Collections per page on the listing.
const COLLECTIONS_PER_PAGE: i64 = 4;

/// Products per page inside a collection and on `/collections/all`.
const PRODUCTS_PER_PAGE: i64 = 8;

/// Collection listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsIndexTemplate {
    pub nonce: String,
    pub collections: Vec<Collection>,
    pub nav: PageNav,
}

/// Product grid page, used for a collection and for all products.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub nonce: String,
    pub title: String,
    pub description_html: String,
    pub products: Vec<Product>,
    pub nav: PageNav,
}

/// Display the collection listing.
#[instrument(skip(state, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let connection = state
        .storefront()
        .get_collections(page.request(COLLECTIONS_PER_PAGE))
        .await?;

    Ok(CollectionsIndexTemplate {
        nonce,
        nav: PageNav::new("/collections", &connection.page_info),
        collections: connection.collections,
    })
}

/// Display every product in the store.
#[instrument(skip(state, nonce))]
pub async fn all(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let connection = state
        .storefront()
        .get_products(page.request(PRODUCTS_PER_PAGE), None, false)
        .await?;

    Ok(CollectionShowTemplate {
        nonce,
        title: "All products".to_string(),
        description_html: String::new(),
        nav: PageNav::new("/collections/all", &connection.page_info),
        products: connection.products,
    })
}

/// Display a collection; 404 when the handle is unknown.
#[instrument(skip(state, page, nonce), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(page): Query<PageQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let collection = state
        .storefront()
        .get_collection_by_handle(&handle, page.request(PRODUCTS_PER_PAGE))
        .await?;

    Ok(CollectionShowTemplate {
        nonce,
        nav: PageNav::new(
            &format!("/collections/{}", collection.handle),
            &collection.products.page_info,
        ),
        title: collection.title,
        description_html: collection.description_html,
        products: collection.products.products,
    })
}
