//! Response shapes shared across operations.
//!
//! Field names follow the GraphQL schema (`camelCase`). Selections that are
//! only made by some documents use `#[serde(default)]` so one struct serves
//! both list and detail queries.

use chrono::{DateTime, Utc};
use lumen_core::{CartId, CartLineId, Price, PriceError, ProductVariantId};
use serde::{Deserialize, Serialize};

use crate::shopify::types::PageRequest;

// =============================================================================
// Scalars
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: String,
    pub currency_code: String,
}

/// `MoneyV2`, validated into a [`Price`] while decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct MoneyFields(pub Price);

impl TryFrom<RawMoney> for MoneyFields {
    type Error = PriceError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Price::parse(&raw.amount, &raw.currency_code).map(Self)
    }
}

// =============================================================================
// Connections
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfoFields {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfoFields,
}

/// `first`/`last`/`after`/`before` arguments, flattened into variables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageVariables {
    pub first: Option<i64>,
    pub last: Option<i64>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl From<PageRequest<'_>> for PageVariables {
    fn from(page: PageRequest<'_>) -> Self {
        match page {
            PageRequest::Forward { first, after } => Self {
                first: Some(first),
                after: after.map(String::from),
                ..Self::default()
            },
            PageRequest::Backward { last, before } => Self {
                last: Some(last),
                before: Some(before.to_string()),
                ..Self::default()
            },
        }
    }
}

// =============================================================================
// Shared Objects
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    pub url: String,
    pub alt_text: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeoFields {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetafieldFields {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandleFields {
    pub handle: String,
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OptionValueFields {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionFields {
    pub name: String,
    pub option_values: Vec<OptionValueFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFields {
    pub id: ProductVariantId,
    pub title: String,
    pub available_for_sale: bool,
    pub sku: Option<String>,
    pub price: MoneyFields,
    pub compare_at_price: Option<MoneyFields>,
    pub selected_options: Vec<SelectedOptionFields>,
    pub image: Option<ImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeFields {
    pub min_variant_price: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price_range: PriceRangeFields,
    pub compare_at_price_range: Option<PriceRangeFields>,
    pub featured_image: Option<ImageFields>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Nodes<ImageFields>,
    #[serde(default)]
    pub options: Vec<ProductOptionFields>,
    #[serde(default)]
    pub variants: Nodes<VariantFields>,
    pub seo: Option<SeoFields>,
    pub faq: Option<MetafieldFields>,
    #[serde(default, rename = "q_a")]
    pub q_a: Option<MetafieldFields>,
    #[serde(default, rename = "product_features")]
    pub product_features: Option<MetafieldFields>,
    pub testimonials: Option<MetafieldFields>,
}

// =============================================================================
// Collections
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    pub image: Option<ImageFields>,
    pub seo: Option<SeoFields>,
    pub products: Option<Connection<ProductFields>>,
}

// =============================================================================
// Blogs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorFields {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content_html: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_v2: Option<AuthorFields>,
    pub image: Option<ImageFields>,
    pub seo: Option<SeoFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogFields {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub seo: Option<SeoFields>,
    pub articles: Connection<ArticleFields>,
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionLinkFields {
    pub handle: String,
    pub title: String,
    pub image: Option<ImageFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleLinkFields {
    pub handle: String,
    pub title: String,
    pub image: Option<ImageFields>,
    pub blog: HandleFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySuggestionFields {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictiveSearchFields {
    #[serde(default)]
    pub products: Vec<ProductFields>,
    #[serde(default)]
    pub collections: Vec<CollectionLinkFields>,
    #[serde(default)]
    pub articles: Vec<ArticleLinkFields>,
    #[serde(default)]
    pub queries: Vec<QuerySuggestionFields>,
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MerchandiseProductFields {
    pub handle: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseFields {
    pub id: ProductVariantId,
    pub title: String,
    pub image: Option<ImageFields>,
    pub selected_options: Vec<SelectedOptionFields>,
    pub product: MerchandiseProductFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCostFields {
    pub amount_per_quantity: MoneyFields,
    pub compare_at_amount_per_quantity: Option<MoneyFields>,
    pub total_amount: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLineFields {
    pub id: CartLineId,
    pub quantity: u32,
    pub cost: CartLineCostFields,
    pub merchandise: MerchandiseFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostFields {
    pub subtotal_amount: MoneyFields,
    pub total_amount: MoneyFields,
    pub total_tax_amount: Option<MoneyFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountCodeFields {
    pub code: String,
    pub applicable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardFields {
    pub id: String,
    pub last_characters: String,
    pub amount_used: MoneyFields,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFields {
    pub id: CartId,
    pub checkout_url: String,
    pub total_quantity: u32,
    pub note: Option<String>,
    pub cost: CartCostFields,
    #[serde(default)]
    pub discount_codes: Vec<DiscountCodeFields>,
    #[serde(default)]
    pub applied_gift_cards: Vec<GiftCardFields>,
    pub lines: Nodes<CartLineFields>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserErrorFields {
    pub code: Option<String>,
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload shared by every cart mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub cart: Option<CartFields>,
    #[serde(default)]
    pub user_errors: Vec<UserErrorFields>,
}
