//! Collection queries.

operation!(
    /// One page of collection cards.
    GetCollections,
    get_collections,
    "Collections",
    concat!(
        "query Collections($first: Int, $last: Int, $after: String, $before: String, ",
        "$sortKey: CollectionSortKeys, $reverse: Boolean) { ",
        "collections(first: $first, last: $last, after: $after, before: $before, ",
        "sortKey: $sortKey, reverse: $reverse) { nodes { ",
        collection_card_fields!(),
        " } ",
        page_info_fields!(),
        " } }"
    )
);

operation!(
    /// A collection with one page of its products.
    GetCollectionByHandle,
    get_collection_by_handle,
    "CollectionByHandle",
    concat!(
        "query CollectionByHandle($handle: String!, $first: Int, $last: Int, ",
        "$after: String, $before: String) { collection(handle: $handle) { ",
        collection_card_fields!(),
        " descriptionHtml ",
        seo_fields!(),
        " products(first: $first, last: $last, after: $after, before: $before) { nodes { ",
        product_card_fields!(),
        " } ",
        page_info_fields!(),
        " } } }"
    )
);

/// Sort keys accepted by the `collections` connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionSortKeys {
    UpdatedAt,
}

pub mod get_collections {
    use serde::{Deserialize, Serialize};

    use super::super::fields::{CollectionFields, Connection, PageVariables};
    use super::CollectionSortKeys;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        #[serde(flatten)]
        pub page: PageVariables,
        pub sort_key: Option<CollectionSortKeys>,
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Connection<CollectionFields>,
    }
}

pub mod get_collection_by_handle {
    use serde::{Deserialize, Serialize};

    use super::super::fields::{CollectionFields, PageVariables};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        #[serde(flatten)]
        pub page: PageVariables,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionFields>,
    }
}
