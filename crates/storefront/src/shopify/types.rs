//! Domain types for the Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the wire types
//! the GraphQL responses decode into. Money is carried as
//! [`lumen_core::Price`] so templates and the cart projection never handle
//! decimal strings.

use chrono::{DateTime, Utc};
use lumen_core::{CartId, CartLineId, Price, ProductVariantId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared Types
// =============================================================================

/// Product, collection, or article image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL on the Shopify CDN.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

/// SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    /// Page title for search engines.
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

/// Pagination information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor for the first item.
    pub start_cursor: Option<String>,
    /// Cursor for the last item.
    pub end_cursor: Option<String>,
}

/// Cursor arguments for a connection page.
///
/// Shopify only accepts `first`/`after` or `last`/`before`, never a mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest<'a> {
    Forward { first: i64, after: Option<&'a str> },
    Backward { last: i64, before: &'a str },
}

impl<'a> PageRequest<'a> {
    /// Build a page request from optional `cursor`/`direction` query params.
    #[must_use]
    pub fn from_cursor(page_size: i64, cursor: Option<&'a str>, backward: bool) -> Self {
        match cursor.filter(|c| !c.is_empty()) {
            Some(before) if backward => Self::Backward {
                last: page_size,
                before,
            },
            after => Self::Forward {
                first: page_size,
                after,
            },
        }
    }
}

// =============================================================================
// Product Types
// =============================================================================

/// Selected option on a product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Selected value (e.g., "50 ml").
    pub value: String,
}

/// Product option definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Available values (e.g., `["30 ml", "50 ml"]`).
    pub values: Vec<String>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID.
    pub id: ProductVariantId,
    /// Variant title (combination of option values).
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// SKU code.
    pub sku: Option<String>,
    /// Current price.
    pub price: Price,
    /// Compare-at price (original price if on sale).
    pub compare_at_price: Option<Price>,
    /// Selected options for this variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant image.
    pub image: Option<Image>,
}

impl ProductVariant {
    /// Whether the variant is discounted against its compare-at price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .as_ref()
            .is_some_and(|compare_at| compare_at.is_markdown_of(&self.price))
    }

    /// Whether every given option matches this variant's selection.
    #[must_use]
    pub fn matches(&self, selection: &[SelectedOption]) -> bool {
        selection.iter().all(|wanted| {
            self.selected_options
                .iter()
                .any(|o| o.name.eq_ignore_ascii_case(&wanted.name) && o.value == wanted.value)
        })
    }
}

/// Raw JSON values of the `custom.*` product metafields.
///
/// Kept as strings; `crate::metafields` parses them leniently at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMetafields {
    /// `custom.faq`
    pub faq: Option<String>,
    /// `custom.q_a`
    pub q_a: Option<String>,
    /// `custom.product_features`
    pub product_features: Option<String>,
    /// `custom.testimonials`
    pub testimonials: Option<String>,
}

/// A product in the store.
///
/// List queries select a subset of fields; the rest default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Vendor name.
    pub vendor: String,
    /// Product type/category.
    pub product_type: String,
    /// Product tags.
    pub tags: Vec<String>,
    /// Whether any variant is available.
    pub available_for_sale: bool,
    /// Lowest variant price.
    pub price: Price,
    /// Lowest variant compare-at price, when any variant has one.
    pub compare_at_price: Option<Price>,
    /// Featured image.
    pub featured_image: Option<Image>,
    /// All product images.
    pub images: Vec<Image>,
    /// Product options.
    pub options: Vec<ProductOption>,
    /// Product variants.
    pub variants: Vec<ProductVariant>,
    /// SEO metadata.
    pub seo: Seo,
    /// Content metafields.
    pub metafields: ProductMetafields,
}

impl Product {
    /// Whether the card price should render as a sale.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .as_ref()
            .is_some_and(|compare_at| compare_at.is_markdown_of(&self.price))
    }

    /// Pick the variant matching `selection`, falling back to the first
    /// available variant and then to the first variant.
    #[must_use]
    pub fn select_variant(&self, selection: &[SelectedOption]) -> Option<&ProductVariant> {
        let known: Vec<SelectedOption> = selection
            .iter()
            .filter(|s| {
                self.options
                    .iter()
                    .any(|o| o.name.eq_ignore_ascii_case(&s.name) && o.values.contains(&s.value))
            })
            .cloned()
            .collect();

        if !known.is_empty()
            && let Some(variant) = self.variants.iter().find(|v| v.matches(&known))
        {
            return Some(variant);
        }

        self.variants
            .iter()
            .find(|v| v.available_for_sale)
            .or_else(|| self.variants.first())
    }
}

/// Paginated list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConnection {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Collection title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Collection image.
    pub image: Option<Image>,
    /// SEO metadata.
    pub seo: Seo,
    /// One page of products (empty for list queries).
    pub products: ProductConnection,
}

/// Paginated list of collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConnection {
    /// Collections in this page.
    pub collections: Vec<Collection>,
    /// Pagination info.
    pub page_info: PageInfo,
}

// =============================================================================
// Blog Types
// =============================================================================

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Article title.
    pub title: String,
    /// Short plain-text excerpt.
    pub excerpt: Option<String>,
    /// Full HTML body (empty for list queries).
    pub content_html: String,
    /// Publication timestamp.
    pub published_at: Option<DateTime<Utc>>,
    /// Author display name.
    pub author: Option<String>,
    /// Hero image.
    pub image: Option<Image>,
    /// SEO metadata.
    pub seo: Seo,
}

impl Article {
    /// Publication date as `March 14, 2026`.
    #[must_use]
    pub fn published_on(&self) -> Option<String> {
        self.published_at
            .map(|at| at.format("%B %-d, %Y").to_string())
    }
}

/// Paginated list of articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleConnection {
    /// Articles in this page.
    pub articles: Vec<Article>,
    /// Pagination info.
    pub page_info: PageInfo,
}

/// An article together with the blog it was looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogArticle {
    /// Blog handle.
    pub blog_handle: String,
    /// Blog title.
    pub blog_title: String,
    /// The article.
    pub article: Article,
}

/// A blog with one page of articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Blog ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Blog title.
    pub title: String,
    /// SEO metadata.
    pub seo: Seo,
    /// Articles in this page.
    pub articles: ArticleConnection,
}

// =============================================================================
// Search Types
// =============================================================================

/// A collection or article hit in predictive search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLink {
    /// Display title.
    pub title: String,
    /// Storefront path (e.g., `/collections/serums`).
    pub url: String,
    /// Thumbnail.
    pub image: Option<Image>,
}

/// A query suggestion from predictive search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySuggestion {
    /// Plain text of the suggestion.
    pub text: String,
}

/// Predictive search results grouped by resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictiveSearchResult {
    pub products: Vec<Product>,
    pub collections: Vec<SearchLink>,
    pub articles: Vec<SearchLink>,
    pub queries: Vec<QuerySuggestion>,
}

impl PredictiveSearchResult {
    /// Whether every group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.collections.is_empty()
            && self.articles.is_empty()
            && self.queries.is_empty()
    }

    /// Number of hits across all groups.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len() + self.collections.len() + self.articles.len() + self.queries.len()
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Merchandise in a cart line (simplified product variant info).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: ProductVariantId,
    /// Variant title.
    pub title: String,
    /// Parent product handle.
    pub product_handle: String,
    /// Parent product title.
    pub product_title: String,
    /// Variant image.
    pub image: Option<Image>,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: CartLineId,
    /// Quantity.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Price,
    /// Compare-at price per unit.
    pub compare_at_unit_price: Option<Price>,
    /// Line total after line-level discounts.
    pub total: Price,
    /// Product variant.
    pub merchandise: CartMerchandise,
}

/// Cart cost summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCost {
    /// Subtotal before tax and shipping.
    pub subtotal: Price,
    /// Total amount.
    pub total: Price,
    /// Total tax amount, when Shopify has computed it.
    pub total_tax: Option<Price>,
}

/// Discount code applied to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartDiscountCode {
    /// The discount code.
    pub code: String,
    /// Whether the code is applicable.
    pub applicable: bool,
}

/// Gift card applied to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedGiftCard {
    /// Gift card ID.
    pub id: String,
    /// Last characters of the code.
    pub last_characters: String,
    /// Amount applied to this cart.
    pub amount_used: Price,
}

/// A shopping cart as confirmed by Shopify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Hosted checkout URL.
    pub checkout_url: String,
    /// Total item quantity.
    pub total_quantity: u32,
    /// Cart note.
    pub note: Option<String>,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Applied discount codes.
    pub discount_codes: Vec<CartDiscountCode>,
    /// Applied gift cards.
    pub applied_gift_cards: Vec<AppliedGiftCard>,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

/// Input for adding a line to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: ProductVariantId,
    /// Quantity to add.
    pub quantity: u32,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: CartLineId,
    /// New quantity (0 removes the line).
    pub quantity: u32,
}

/// User error from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUserError {
    /// Error code.
    pub code: Option<String>,
    /// Field path that caused the error.
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(id: u32, size: &str, available: bool) -> ProductVariant {
        ProductVariant {
            id: format!("gid://shopify/ProductVariant/{id}").parse().unwrap(),
            title: size.to_string(),
            available_for_sale: available,
            sku: None,
            price: Price::parse("24.90", "EUR").unwrap(),
            compare_at_price: None,
            selected_options: vec![SelectedOption {
                name: "Size".to_string(),
                value: size.to_string(),
            }],
            image: None,
        }
    }

    fn product() -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "glow-serum".to_string(),
            title: "Glow Serum".to_string(),
            description: String::new(),
            description_html: String::new(),
            vendor: "Lumen".to_string(),
            product_type: "Serum".to_string(),
            tags: vec![],
            available_for_sale: true,
            price: Price::parse("24.90", "EUR").unwrap(),
            compare_at_price: None,
            featured_image: None,
            images: vec![],
            options: vec![ProductOption {
                name: "Size".to_string(),
                values: vec!["30 ml".to_string(), "50 ml".to_string()],
            }],
            variants: vec![variant(1, "30 ml", false), variant(2, "50 ml", true)],
            seo: Seo::default(),
            metafields: ProductMetafields::default(),
        }
    }

    #[test]
    fn test_select_variant_by_option() {
        let product = product();
        let selection = [SelectedOption {
            name: "size".to_string(),
            value: "30 ml".to_string(),
        }];
        let variant = product.select_variant(&selection).unwrap();
        assert_eq!(variant.title, "30 ml");
    }

    #[test]
    fn test_select_variant_falls_back_to_first_available() {
        let product = product();
        assert_eq!(product.select_variant(&[]).unwrap().title, "50 ml");

        let unknown = [SelectedOption {
            name: "Size".to_string(),
            value: "1 l".to_string(),
        }];
        assert_eq!(product.select_variant(&unknown).unwrap().title, "50 ml");
    }

    #[test]
    fn test_variant_on_sale() {
        let mut v = variant(3, "50 ml", true);
        assert!(!v.is_on_sale());
        v.compare_at_price = Some(Price::parse("29.90", "EUR").unwrap());
        assert!(v.is_on_sale());
    }

    #[test]
    fn test_page_request_from_cursor() {
        assert_eq!(
            PageRequest::from_cursor(8, None, false),
            PageRequest::Forward {
                first: 8,
                after: None
            }
        );
        assert_eq!(
            PageRequest::from_cursor(8, Some("abc"), true),
            PageRequest::Backward {
                last: 8,
                before: "abc"
            }
        );
        assert_eq!(
            PageRequest::from_cursor(8, Some(""), true),
            PageRequest::Forward {
                first: 8,
                after: None
            }
        );
    }
}
