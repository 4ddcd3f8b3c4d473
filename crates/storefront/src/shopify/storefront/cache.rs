//! Cache types for Storefront API responses.

use crate::shopify::types::{
    BlogArticle, Blog, Collection, CollectionConnection, PageRequest, Product, ProductConnection,
};

/// Cache key for catalog and content reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products { page: String, sort: String },
    FeaturedCollection,
    Collection { handle: String, page: String },
    Collections { page: String },
    Blog { handle: String, page: String },
    Article { blog: String, article: String },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductConnection),
    FeaturedCollection(Option<Box<Collection>>),
    Collection(Box<Collection>),
    Collections(CollectionConnection),
    Blog(Box<Blog>),
    Article(Box<BlogArticle>),
}

/// Stable key fragment for a page request.
pub fn page_key(page: PageRequest<'_>) -> String {
    match page {
        PageRequest::Forward { first, after } => format!("f{first}:{}", after.unwrap_or("")),
        PageRequest::Backward { last, before } => format!("b{last}:{before}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_distinguishes_direction() {
        let forward = page_key(PageRequest::Forward {
            first: 8,
            after: Some("abc"),
        });
        let backward = page_key(PageRequest::Backward {
            last: 8,
            before: "abc",
        });
        assert_ne!(forward, backward);
        assert_eq!(
            page_key(PageRequest::Forward {
                first: 8,
                after: None
            }),
            "f8:"
        );
    }
}
