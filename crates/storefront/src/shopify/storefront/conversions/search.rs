//! Predictive search conversion.

use crate::shopify::types::{PredictiveSearchResult, QuerySuggestion, SearchLink};

use super::super::queries::fields::PredictiveSearchFields;
use super::{convert_image, convert_product};

pub fn convert_predictive_search(result: PredictiveSearchFields) -> PredictiveSearchResult {
    PredictiveSearchResult {
        products: result.products.into_iter().map(convert_product).collect(),
        collections: result
            .collections
            .into_iter()
            .map(|c| SearchLink {
                url: format!("/collections/{}", c.handle),
                title: c.title,
                image: c.image.map(convert_image),
            })
            .collect(),
        articles: result
            .articles
            .into_iter()
            .map(|a| SearchLink {
                url: format!("/blogs/{}/{}", a.blog.handle, a.handle),
                title: a.title,
                image: a.image.map(convert_image),
            })
            .collect(),
        queries: result
            .queries
            .into_iter()
            .map(|q| QuerySuggestion { text: q.text })
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_predictive_search_urls() {
        let json = serde_json::json!({
            "products": [],
            "collections": [{ "handle": "serums", "title": "Serums", "image": null }],
            "articles": [{ "handle": "spf-myths", "title": "SPF myths", "image": null, "blog": { "handle": "journal" } }],
            "queries": [{ "text": "serum" }]
        });
        let result = convert_predictive_search(serde_json::from_value(json).unwrap());

        assert_eq!(result.collections[0].url, "/collections/serums");
        assert_eq!(result.articles[0].url, "/blogs/journal/spf-myths");
        assert_eq!(result.total(), 3);
        assert!(!result.is_empty());
    }
}
