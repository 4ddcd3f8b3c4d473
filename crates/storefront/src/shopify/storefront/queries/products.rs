//! Product queries.

operation!(
    /// A single product with variants, options, images and content metafields.
    GetProductByHandle,
    get_product_by_handle,
    "ProductByHandle",
    concat!(
        "query ProductByHandle($handle: String!) { product(handle: $handle) { ",
        product_detail_fields!(),
        " } }"
    )
);

operation!(
    /// One page of product cards across the whole catalog.
    GetProducts,
    get_products,
    "Products",
    concat!(
        "query Products($first: Int, $last: Int, $after: String, $before: String, ",
        "$sortKey: ProductSortKeys, $reverse: Boolean) { ",
        "products(first: $first, last: $last, after: $after, before: $before, ",
        "sortKey: $sortKey, reverse: $reverse) { nodes { ",
        product_card_fields!(),
        " } ",
        page_info_fields!(),
        " } }"
    )
);

/// Sort keys accepted by the `products` connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKeys {
    UpdatedAt,
}

pub mod get_product_by_handle {
    use serde::{Deserialize, Serialize};

    use super::super::fields::ProductFields;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }
}

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use super::super::fields::{Connection, PageVariables, ProductFields};
    use super::ProductSortKeys;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        #[serde(flatten)]
        pub page: PageVariables,
        pub sort_key: Option<ProductSortKeys>,
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<ProductFields>,
    }
}
