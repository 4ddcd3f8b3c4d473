//! Predictive search.

operation!(
    /// Products, collections, articles and query suggestions for a partial term.
    PredictiveSearch,
    predictive_search,
    "PredictiveSearch",
    concat!(
        "query PredictiveSearch($query: String!, $limit: Int!) { ",
        "predictiveSearch(query: $query, limit: $limit, limitScope: EACH, ",
        "types: [PRODUCT, COLLECTION, ARTICLE, QUERY]) { ",
        "products { ",
        product_card_fields!(),
        " } collections { handle title image { ",
        image_fields!(),
        " } } articles { handle title image { ",
        image_fields!(),
        " } blog { handle } } queries { text } } }"
    )
);

pub mod predictive_search {
    use serde::{Deserialize, Serialize};

    use super::super::fields::PredictiveSearchFields;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub query: String,
        pub limit: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub predictive_search: Option<PredictiveSearchFields>,
    }
}
