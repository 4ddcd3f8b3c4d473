//! GraphQL documents for the Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`Operation`], which plays
//! the role `graphql_client::GraphQLQuery` plays for schema-derived queries:
//! it names the document and ties it to its variables and response types.
//! Selections are assembled from the field macros below so every document
//! asks for the same shape of product, image, money, and cart.

use graphql_client::QueryBody;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A GraphQL operation with typed variables and response data.
pub trait Operation {
    /// Operation name as written in [`Self::QUERY`].
    const NAME: &'static str;
    /// Full GraphQL document.
    const QUERY: &'static str;

    type Variables: Serialize;
    type ResponseData: DeserializeOwned;

    /// Build the request body sent to the GraphQL endpoint.
    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: Self::QUERY,
            operation_name: Self::NAME,
        }
    }
}

// =============================================================================
// Field Selections
// =============================================================================

macro_rules! money_fields {
    () => {
        "amount currencyCode"
    };
}

macro_rules! image_fields {
    () => {
        "url altText width height"
    };
}

macro_rules! seo_fields {
    () => {
        "seo { title description }"
    };
}

macro_rules! page_info_fields {
    () => {
        "pageInfo { hasNextPage hasPreviousPage startCursor endCursor }"
    };
}

macro_rules! product_card_fields {
    () => {
        concat!(
            "id handle title availableForSale ",
            "featuredImage { ",
            image_fields!(),
            " } ",
            "priceRange { minVariantPrice { ",
            money_fields!(),
            " } } ",
            "compareAtPriceRange { minVariantPrice { ",
            money_fields!(),
            " } }"
        )
    };
}

macro_rules! product_detail_fields {
    () => {
        concat!(
            product_card_fields!(),
            " description descriptionHtml vendor productType tags ",
            seo_fields!(),
            " images(first: 10) { nodes { ",
            image_fields!(),
            " } } ",
            "options { name optionValues { name } } ",
            "variants(first: 50) { nodes { id title availableForSale sku ",
            "price { ",
            money_fields!(),
            " } compareAtPrice { ",
            money_fields!(),
            " } selectedOptions { name value } image { ",
            image_fields!(),
            " } } } ",
            "faq: metafield(namespace: \"custom\", key: \"faq\") { value } ",
            "q_a: metafield(namespace: \"custom\", key: \"q_a\") { value } ",
            "product_features: metafield(namespace: \"custom\", key: \"product_features\") { value } ",
            "testimonials: metafield(namespace: \"custom\", key: \"testimonials\") { value }"
        )
    };
}

macro_rules! collection_card_fields {
    () => {
        concat!(
            "id handle title description image { ",
            image_fields!(),
            " }"
        )
    };
}

macro_rules! article_card_fields {
    () => {
        concat!(
            "id handle title excerpt publishedAt authorV2 { name } image { ",
            image_fields!(),
            " }"
        )
    };
}

macro_rules! cart_fields {
    () => {
        concat!(
            "id checkoutUrl totalQuantity note ",
            "cost { subtotalAmount { ",
            money_fields!(),
            " } totalAmount { ",
            money_fields!(),
            " } totalTaxAmount { ",
            money_fields!(),
            " } } ",
            "discountCodes { code applicable } ",
            "appliedGiftCards { id lastCharacters amountUsed { ",
            money_fields!(),
            " } } ",
            "lines(first: 100) { nodes { id quantity ",
            "cost { amountPerQuantity { ",
            money_fields!(),
            " } compareAtAmountPerQuantity { ",
            money_fields!(),
            " } totalAmount { ",
            money_fields!(),
            " } } ",
            "merchandise { ... on ProductVariant { id title image { ",
            image_fields!(),
            " } selectedOptions { name value } product { handle title } } } } }"
        )
    };
}

macro_rules! cart_payload_fields {
    () => {
        concat!(
            "cart { ",
            cart_fields!(),
            " } userErrors { code field message }"
        )
    };
}

/// Declare an [`Operation`] implementor.
macro_rules! operation {
    (
        $(#[$meta:meta])*
        $name:ident, $module:ident, $op_name:literal, $query:expr
    ) => {
        $(#[$meta])*
        pub struct $name;

        impl $crate::shopify::storefront::queries::Operation for $name {
            const NAME: &'static str = $op_name;
            const QUERY: &'static str = $query;
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;
        }
    };
}

pub mod fields;

mod blogs;
mod cart;
mod collections;
mod products;
mod search;

pub use blogs::*;
pub use cart::*;
pub use collections::*;
pub use products::*;
pub use search::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_balanced(query: &str) {
        let opens = query.matches('{').count();
        let closes = query.matches('}').count();
        assert_eq!(opens, closes, "unbalanced braces in: {query}");
        let parens_open = query.matches('(').count();
        let parens_close = query.matches(')').count();
        assert_eq!(parens_open, parens_close, "unbalanced parens in: {query}");
    }

    #[test]
    fn test_documents_are_balanced() {
        assert_balanced(GetProductByHandle::QUERY);
        assert_balanced(GetProducts::QUERY);
        assert_balanced(GetCollections::QUERY);
        assert_balanced(GetCollectionByHandle::QUERY);
        assert_balanced(GetBlogByHandle::QUERY);
        assert_balanced(GetArticleByHandle::QUERY);
        assert_balanced(PredictiveSearch::QUERY);
        assert_balanced(GetCart::QUERY);
        assert_balanced(CreateCart::QUERY);
        assert_balanced(AddCartLines::QUERY);
        assert_balanced(UpdateCartLines::QUERY);
        assert_balanced(RemoveCartLines::QUERY);
        assert_balanced(UpdateCartDiscountCodes::QUERY);
        assert_balanced(UpdateCartGiftCardCodes::QUERY);
    }

    #[test]
    fn test_document_names_match_operation() {
        assert!(GetProductByHandle::QUERY.starts_with("query ProductByHandle("));
        assert!(AddCartLines::QUERY.starts_with("mutation CartLinesAdd("));
        assert!(PredictiveSearch::QUERY.contains("predictiveSearch("));
    }

    #[test]
    fn test_product_detail_requests_metafields() {
        for key in ["faq", "q_a", "product_features", "testimonials"] {
            assert!(
                GetProductByHandle::QUERY.contains(&format!("key: \"{key}\"")),
                "missing metafield {key}"
            );
        }
    }

    #[test]
    fn test_build_query_envelope() {
        let body = GetCart::build_query(cart::get_cart::Variables {
            cart_id: "gid://shopify/Cart/1".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json["operationName"], "CartQuery");
        assert_eq!(json["variables"]["cartId"], "gid://shopify/Cart/1");
    }
}
