//! Blog and article conversion functions.

use crate::shopify::types::{Article, ArticleConnection, Blog};

use super::super::queries::fields::{ArticleFields, BlogFields};
use super::{convert_image, convert_page_info, convert_seo};

pub fn convert_article(article: ArticleFields) -> Article {
    Article {
        id: article.id,
        handle: article.handle,
        title: article.title,
        excerpt: article.excerpt.filter(|e| !e.trim().is_empty()),
        content_html: article.content_html,
        published_at: article.published_at,
        author: article.author_v2.map(|a| a.name),
        image: article.image.map(convert_image),
        seo: convert_seo(article.seo),
    }
}

pub fn convert_blog(blog: BlogFields) -> Blog {
    Blog {
        id: blog.id,
        handle: blog.handle,
        title: blog.title,
        seo: convert_seo(blog.seo),
        articles: ArticleConnection {
            articles: blog
                .articles
                .nodes
                .into_iter()
                .map(convert_article)
                .collect(),
            page_info: convert_page_info(blog.articles.page_info),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_blog() {
        let json = serde_json::json!({
            "id": "gid://shopify/Blog/1",
            "handle": "journal",
            "title": "Journal",
            "seo": null,
            "articles": {
                "nodes": [{
                    "id": "gid://shopify/Article/9",
                    "handle": "spf-myths",
                    "title": "SPF myths",
                    "excerpt": "",
                    "publishedAt": "2026-03-14T09:30:00Z",
                    "authorV2": { "name": "Ana" },
                    "image": null
                }],
                "pageInfo": { "hasNextPage": false, "hasPreviousPage": false, "startCursor": null, "endCursor": null }
            }
        });
        let blog = convert_blog(serde_json::from_value(json).unwrap());
        let article = &blog.articles.articles[0];

        assert_eq!(article.handle, "spf-myths");
        assert!(article.excerpt.is_none());
        assert_eq!(article.author.as_deref(), Some("Ana"));
        assert_eq!(
            article.published_at.unwrap().to_rfc3339(),
            "2026-03-14T09:30:00+00:00"
        );
    }
}
