//! Shopify Storefront API client implementation.
//!
//! Posts hand-written GraphQL documents in `graphql_client` request envelopes
//! with `reqwest` 0.13 and decodes `graphql_client::Response` envelopes into
//! local wire types. Catalog and content reads are cached using `moka`
//! (5-minute TTL); carts never are.

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::Response;
use lumen_core::{CartId, CartLineId};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{
    Blog, BlogArticle, Cart, CartLineInput, CartLineUpdateInput, Collection,
    CollectionConnection, PageRequest, PredictiveSearchResult, Product, ProductConnection,
};
use crate::shopify::{GraphQLError, GraphQLErrorLocation, ShopifyError};

use cache::{CacheKey, CacheValue, page_key};
use conversions::{
    convert_article, convert_blog, convert_cart, convert_collection,
    convert_collection_connection, convert_predictive_search, convert_product,
    convert_product_connection, convert_user_error,
};
use queries::fields::CartPayload;
use queries::{
    AddCartLines, CollectionSortKeys, CreateCart, GetArticleByHandle, GetBlogByHandle, GetCart,
    GetCollectionByHandle, GetCollections, GetProductByHandle, GetProducts, Operation,
    PredictiveSearch, ProductSortKeys, RemoveCartLines, UpdateCartDiscountCodes,
    UpdateCartGiftCardCodes, UpdateCartLines, add_cart_lines, create_cart, get_article_by_handle,
    get_blog_by_handle, get_cart, get_collection_by_handle, get_collections, get_product_by_handle,
    get_products, predictive_search, remove_cart_lines, update_cart_discount_codes,
    update_cart_gift_card_codes, update_cart_lines,
};

/// Header carrying the server-side private access token.
const PRIVATE_TOKEN_HEADER: &str = "Shopify-Storefront-Private-Token";

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides type-safe access to products, collections, blogs, search, and
/// cart operations. Catalog and content reads are cached for 5 minutes.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(
            config.graphql_endpoint(),
            config.storefront_private_token.expose_secret(),
        )
    }

    /// Create a client against an explicit GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, access_token: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                access_token: access_token.to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: Operation>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(PRIVATE_TOKEN_HEADER, &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Body as text first so parse failures can be logged
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                operation = Q::NAME,
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                response_text.chars().take(200).collect::<String>()
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    operation = Q::NAME,
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(operation = Q::NAME, errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = Q::NAME,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    async fn cached(&self, key: &CacheKey) -> Option<CacheValue> {
        let value = self.inner.cache.get(key).await;
        if value.is_some() {
            debug!(key = ?key, "Cache hit");
        }
        value
    }

    async fn store(&self, key: CacheKey, value: CacheValue) {
        self.inner.cache.insert(key, value).await;
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its handle, including variants and content metafields.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if no product has this handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let key = CacheKey::Product(handle.to_string());
        if let Some(CacheValue::Product(product)) = self.cached(&key).await {
            return Ok(*product);
        }

        let data = self
            .execute::<GetProductByHandle>(get_product_by_handle::Variables {
                handle: handle.to_string(),
            })
            .await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.store(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Get a page of products across the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        page: PageRequest<'_>,
        sort_key: Option<ProductSortKeys>,
        reverse: bool,
    ) -> Result<ProductConnection, ShopifyError> {
        let key = CacheKey::Products {
            page: page_key(page),
            sort: format!("{sort_key:?}:{reverse}"),
        };
        if let Some(CacheValue::Products(products)) = self.cached(&key).await {
            return Ok(products);
        }

        let data = self
            .execute::<GetProducts>(get_products::Variables {
                page: page.into(),
                sort_key,
                reverse: Some(reverse),
            })
            .await?;

        let connection = convert_product_connection(data.products);
        self.store(key, CacheValue::Products(connection.clone()))
            .await;
        Ok(connection)
    }

    /// Get the most recently updated products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_recommended_products(&self, count: i64) -> Result<Vec<Product>, ShopifyError> {
        let page = PageRequest::Forward {
            first: count,
            after: None,
        };
        Ok(self
            .get_products(page, Some(ProductSortKeys::UpdatedAt), true)
            .await?
            .products)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the most recently updated collection, if any exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_collection(&self) -> Result<Option<Collection>, ShopifyError> {
        let key = CacheKey::FeaturedCollection;
        if let Some(CacheValue::FeaturedCollection(collection)) = self.cached(&key).await {
            return Ok(collection.map(|c| *c));
        }

        let data = self
            .execute::<GetCollections>(get_collections::Variables {
                page: PageRequest::Forward {
                    first: 1,
                    after: None,
                }
                .into(),
                sort_key: Some(CollectionSortKeys::UpdatedAt),
                reverse: Some(true),
            })
            .await?;

        let collection = convert_collection_connection(data.collections)
            .collections
            .into_iter()
            .next();
        self.store(
            key,
            CacheValue::FeaturedCollection(collection.clone().map(Box::new)),
        )
        .await;
        Ok(collection)
    }

    /// Get a page of collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_collections(
        &self,
        page: PageRequest<'_>,
    ) -> Result<CollectionConnection, ShopifyError> {
        let key = CacheKey::Collections {
            page: page_key(page),
        };
        if let Some(CacheValue::Collections(collections)) = self.cached(&key).await {
            return Ok(collections);
        }

        let data = self
            .execute::<GetCollections>(get_collections::Variables {
                page: page.into(),
                sort_key: None,
                reverse: None,
            })
            .await?;

        let connection = convert_collection_connection(data.collections);
        self.store(key, CacheValue::Collections(connection.clone()))
            .await;
        Ok(connection)
    }

    /// Get a collection with one page of its products.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if no collection has this handle, or
    /// an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_by_handle(
        &self,
        handle: &str,
        page: PageRequest<'_>,
    ) -> Result<Collection, ShopifyError> {
        let key = CacheKey::Collection {
            handle: handle.to_string(),
            page: page_key(page),
        };
        if let Some(CacheValue::Collection(collection)) = self.cached(&key).await {
            return Ok(*collection);
        }

        let data = self
            .execute::<GetCollectionByHandle>(get_collection_by_handle::Variables {
                handle: handle.to_string(),
                page: page.into(),
            })
            .await?;

        let collection = data
            .collection
            .map(convert_collection)
            .ok_or_else(|| ShopifyError::NotFound(format!("Collection not found: {handle}")))?;

        self.store(key, CacheValue::Collection(Box::new(collection.clone())))
            .await;
        Ok(collection)
    }

    // =========================================================================
    // Blog Methods
    // =========================================================================

    /// Get a blog with one page of its articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if no blog has this handle, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_blog_by_handle(
        &self,
        handle: &str,
        page: PageRequest<'_>,
    ) -> Result<Blog, ShopifyError> {
        let key = CacheKey::Blog {
            handle: handle.to_string(),
            page: page_key(page),
        };
        if let Some(CacheValue::Blog(blog)) = self.cached(&key).await {
            return Ok(*blog);
        }

        let data = self
            .execute::<GetBlogByHandle>(get_blog_by_handle::Variables {
                handle: handle.to_string(),
                page: page.into(),
            })
            .await?;

        let blog = data
            .blog
            .map(convert_blog)
            .ok_or_else(|| ShopifyError::NotFound(format!("Blog not found: {handle}")))?;

        self.store(key, CacheValue::Blog(Box::new(blog.clone())))
            .await;
        Ok(blog)
    }

    /// Get an article by blog and article handle.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if the blog or the article is
    /// missing, or an error if the API request fails.
    #[instrument(skip(self), fields(blog = %blog_handle, article = %article_handle))]
    pub async fn get_article_by_handle(
        &self,
        blog_handle: &str,
        article_handle: &str,
    ) -> Result<BlogArticle, ShopifyError> {
        let key = CacheKey::Article {
            blog: blog_handle.to_string(),
            article: article_handle.to_string(),
        };
        if let Some(CacheValue::Article(article)) = self.cached(&key).await {
            return Ok(*article);
        }

        let data = self
            .execute::<GetArticleByHandle>(get_article_by_handle::Variables {
                blog_handle: blog_handle.to_string(),
                article_handle: article_handle.to_string(),
            })
            .await?;

        let not_found =
            || ShopifyError::NotFound(format!("Article not found: {blog_handle}/{article_handle}"));
        let blog = data.blog.ok_or_else(not_found)?;
        let article = blog.article_by_handle.ok_or_else(not_found)?;

        let article = BlogArticle {
            blog_handle: blog.handle,
            blog_title: blog.title,
            article: convert_article(article),
        };
        self.store(key, CacheValue::Article(Box::new(article.clone())))
            .await;
        Ok(article)
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Predictive search across products, collections, articles and queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn predictive_search(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<PredictiveSearchResult, ShopifyError> {
        let data = self
            .execute::<PredictiveSearch>(predictive_search::Variables {
                query: query.to_string(),
                limit,
            })
            .await?;

        Ok(data
            .predictive_search
            .map(convert_predictive_search)
            .unwrap_or_default())
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::NotFound` if the cart no longer exists, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<GetCart>(get_cart::Variables {
                cart_id: cart_id.to_string(),
            })
            .await?;

        data.cart
            .map(convert_cart)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Create a new cart holding `lines`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails or user errors are returned.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn create_cart(&self, lines: Vec<CartLineInput>) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<CreateCart>(create_cart::Variables {
                input: create_cart::CartInput {
                    lines,
                    discount_codes: Vec::new(),
                },
            })
            .await?;

        cart_from_payload(data.cart_create, "create cart")
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<AddCartLines>(add_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        cart_from_payload(data.cart_lines_add, "add to cart")
    }

    /// Update cart line quantities.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<UpdateCartLines>(update_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                lines,
            })
            .await?;

        cart_from_payload(data.cart_lines_update, "update cart")
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    pub async fn remove_cart_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<RemoveCartLines>(remove_cart_lines::Variables {
                cart_id: cart_id.to_string(),
                line_ids: line_ids.into_iter().map(String::from).collect(),
            })
            .await?;

        cart_from_payload(data.cart_lines_remove, "remove from cart")
    }

    /// Replace the discount codes on a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, discount_codes), fields(cart_id = %cart_id))]
    pub async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        discount_codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<UpdateCartDiscountCodes>(update_cart_discount_codes::Variables {
                cart_id: cart_id.to_string(),
                discount_codes,
            })
            .await?;

        cart_from_payload(data.cart_discount_codes_update, "update discount codes")
    }

    /// Replace the gift card codes on a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, gift_card_codes), fields(cart_id = %cart_id))]
    pub async fn update_gift_card_codes(
        &self,
        cart_id: &CartId,
        gift_card_codes: Vec<String>,
    ) -> Result<Cart, ShopifyError> {
        let data = self
            .execute::<UpdateCartGiftCardCodes>(update_cart_gift_card_codes::Variables {
                cart_id: cart_id.to_string(),
                gift_card_codes,
            })
            .await?;

        cart_from_payload(data.cart_gift_card_codes_update, "update gift cards")
    }
}

/// Unwrap a cart mutation payload, surfacing `userErrors` first.
fn cart_from_payload(payload: Option<CartPayload>, action: &str) -> Result<Cart, ShopifyError> {
    if let Some(result) = payload {
        if !result.user_errors.is_empty() {
            return Err(ShopifyError::UserError(
                result
                    .user_errors
                    .into_iter()
                    .map(|e| convert_user_error(e).message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        if let Some(cart) = result.cart {
            return Ok(convert_cart(cart));
        }
    }

    Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
        "Failed to {action}"
    ))]))
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: error.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TOKEN: &str = "shpat_9fK2mQx7LpR4tVz1";

    fn product_card(handle: &str) -> serde_json::Value {
        json!({
            "id": format!("gid://shopify/Product/{handle}"),
            "handle": handle,
            "title": "Glow Serum",
            "availableForSale": true,
            "featuredImage": null,
            "priceRange": { "minVariantPrice": { "amount": "24.90", "currencyCode": "EUR" } },
            "compareAtPriceRange": null
        })
    }

    fn cart_json(quantity: u32) -> serde_json::Value {
        json!({
            "id": "gid://shopify/Cart/c1?key=k",
            "checkoutUrl": "https://checkout.example/c1",
            "totalQuantity": quantity,
            "note": null,
            "cost": {
                "subtotalAmount": { "amount": "24.90", "currencyCode": "EUR" },
                "totalAmount": { "amount": "24.90", "currencyCode": "EUR" },
                "totalTaxAmount": null
            },
            "discountCodes": [],
            "appliedGiftCards": [],
            "lines": { "nodes": [] }
        })
    }

    fn client_for(server: &MockServer) -> StorefrontClient {
        StorefrontClient::with_endpoint(format!("{}/graphql.json", server.uri()), TOKEN)
    }

    #[tokio::test]
    async fn test_product_by_handle_sends_private_token_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(PRIVATE_TOKEN_HEADER, TOKEN))
            .and(body_partial_json(json!({
                "operationName": "ProductByHandle",
                "variables": { "handle": "glow-serum" }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "product": product_card("glow-serum") } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.get_product_by_handle("glow-serum").await.unwrap();
        let second = client.get_product_by_handle("glow-serum").await.unwrap();

        assert_eq!(first.handle, "glow-serum");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "product": null } })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_product_by_handle("missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_reads_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_collections(PageRequest::Forward {
                first: 4,
                after: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_graphql_errors_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{
                    "message": "Field 'foo' doesn't exist",
                    "locations": [{ "line": 1, "column": 3 }],
                    "path": ["products", 0]
                }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .predictive_search("serum", 6)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field 'foo' doesn't exist path: products.0 at line 1:3"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_graphql_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_cart(&"gid://shopify/Cart/c1".parse().unwrap())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn test_cart_user_errors_surface() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "operationName": "CartDiscountCodesUpdate" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "cartDiscountCodesUpdate": {
                    "cart": null,
                    "userErrors": [{ "code": "INVALID", "field": ["discountCodes"], "message": "Code is invalid" }]
                } }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .update_discount_codes(&"gid://shopify/Cart/c1".parse().unwrap(), vec!["NOPE".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::UserError(ref m) if m == "Code is invalid"));
    }

    #[tokio::test]
    async fn test_add_cart_lines_posts_variant_ids() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "CartLinesAdd",
                "variables": {
                    "cartId": "gid://shopify/Cart/c1?key=k",
                    "lines": [{ "merchandiseId": "gid://shopify/ProductVariant/11", "quantity": 1 }]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "cartLinesAdd": { "cart": cart_json(1), "userErrors": [] } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cart = client_for(&server)
            .add_cart_lines(
                &"gid://shopify/Cart/c1?key=k".parse().unwrap(),
                vec![CartLineInput {
                    merchandise_id: "gid://shopify/ProductVariant/11".parse().unwrap(),
                    quantity: 1,
                }],
            )
            .await
            .unwrap();
        assert_eq!(cart.total_quantity, 1);
    }
}
