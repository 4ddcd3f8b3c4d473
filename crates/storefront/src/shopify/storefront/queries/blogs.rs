//! Blog and article queries.

operation!(
    /// A blog with one page of article cards.
    GetBlogByHandle,
    get_blog_by_handle,
    "BlogByHandle",
    concat!(
        "query BlogByHandle($handle: String!, $first: Int, $last: Int, ",
        "$after: String, $before: String) { blog(handle: $handle) { id handle title ",
        seo_fields!(),
        " articles(first: $first, last: $last, after: $after, before: $before, ",
        "sortKey: PUBLISHED_AT, reverse: true) { nodes { ",
        article_card_fields!(),
        " } ",
        page_info_fields!(),
        " } } }"
    )
);

operation!(
    /// A single article looked up through its blog.
    GetArticleByHandle,
    get_article_by_handle,
    "ArticleByHandle",
    concat!(
        "query ArticleByHandle($blogHandle: String!, $articleHandle: String!) { ",
        "blog(handle: $blogHandle) { handle title articleByHandle(handle: $articleHandle) { ",
        article_card_fields!(),
        " contentHtml ",
        seo_fields!(),
        " } } }"
    )
);

pub mod get_blog_by_handle {
    use serde::{Deserialize, Serialize};

    use super::super::fields::{BlogFields, PageVariables};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        #[serde(flatten)]
        pub page: PageVariables,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub blog: Option<BlogFields>,
    }
}

pub mod get_article_by_handle {
    use serde::{Deserialize, Serialize};

    use super::super::fields::ArticleFields;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub blog_handle: String,
        pub article_handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BlogWithArticle {
        pub handle: String,
        pub title: String,
        pub article_by_handle: Option<ArticleFields>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub blog: Option<BlogWithArticle>,
    }
}
