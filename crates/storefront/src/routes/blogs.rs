//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use super::{PageNav, PageQuery};
use crate::error::Result;
use crate::filters;
use crate::middleware::CspNonce;
use crate::shopify::{Article, Blog};
use crate::state::AppState;

/// Articles per page on a blog listing.
const ARTICLES_PER_PAGE: i64 = 4;

/// Blog listing template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/show.html")]
pub struct BlogShowTemplate {
    pub nonce: String,
    pub blog: Blog,
    pub nav: PageNav,
}

/// Article template.
#[derive(Template, WebTemplate)]
#[template(path = "blogs/article.html")]
pub struct ArticleTemplate {
    pub nonce: String,
    pub blog_handle: String,
    pub blog_title: String,
    pub article: Article,
}

/// Display a blog's articles, newest first; 404 when the blog is unknown.
#[instrument(skip(state, page, nonce), fields(blog = %blog))]
pub async fn show(
    State(state): State<AppState>,
    Path(blog): Path<String>,
    Query(page): Query<PageQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let blog = state
        .storefront()
        .get_blog_by_handle(&blog, page.request(ARTICLES_PER_PAGE))
        .await?;
    let nav = PageNav::new(&format!("/blogs/{}", blog.handle), &blog.articles.page_info);

    Ok(BlogShowTemplate { nonce, blog, nav })
}

/// Display an article; 404 when either handle is unknown.
#[instrument(skip(state, nonce), fields(blog = %blog, article = %article))]
pub async fn article(
    State(state): State<AppState>,
    Path((blog, article)): Path<(String, String)>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let found = state
        .storefront()
        .get_article_by_handle(&blog, &article)
        .await?;

    Ok(ArticleTemplate {
        nonce,
        blog_handle: found.blog_handle,
        blog_title: found.blog_title,
        article: found.article,
    })
}
