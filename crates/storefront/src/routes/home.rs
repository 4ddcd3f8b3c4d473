//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::{instrument, warn};

use crate::filters;
use crate::metafields::{TESTIMONIALS_KEY, Testimonial, parse_list, testimonials};
use crate::middleware::CspNonce;
use crate::shopify::{Collection, Product};
use crate::state::AppState;

/// Products shown in the "recommended" grid.
const RECOMMENDED_COUNT: i64 = 4;

/// Hero video on the Shopify CDN.
const HERO_VIDEO_URL: &str =
    "https://cdn.shopify.com/videos/c/o/v/54b7adb0eb1f4eb2baf20f130a18b243.mp4";

/// A before/after photo pair for the comparison slider.
pub struct BeforeAfter {
    pub before: &'static str,
    pub after: &'static str,
    pub caption: &'static str,
}

const BEFORE_AFTER: &[BeforeAfter] = &[
    BeforeAfter {
        before: "https://cdn.shopify.com/s/files/1/0924/5894/2788/files/before_2.jpg?v=1742804618",
        after: "https://cdn.shopify.com/s/files/1/0924/5894/2788/files/after_2.png?v=1742804619",
        caption: "Four weeks of the calming routine",
    },
    BeforeAfter {
        before: "https://cdn.shopify.com/s/files/1/0924/5894/2788/files/before.png?v=1742804619",
        after: "https://cdn.shopify.com/s/files/1/0924/5894/2788/files/after.jpg?v=1742804619",
        caption: "Six weeks of the clarifying routine",
    },
];

/// Brand testimonials, stored in the same shape as the product metafield.
const HOME_TESTIMONIALS: &str = r#"[
    {"name":"Nina K.","title":"Combination skin","content":"The quiz pointed me to a routine that finally balanced my T-zone without drying my cheeks.","createdAt":"2026-02-11T09:00:00Z","rating":5,"isFeatured":true},
    {"name":"Eva P.","title":"Sensitive skin","content":"No stinging, no redness. The barrier cream is the first product my skin has not fought back against.","createdAt":"2026-01-28T09:00:00Z","rating":5,"isFeatured":true},
    {"name":"Tjaša M.","content":"Lovely textures and the serum absorbs quickly under makeup.","createdAt":"2026-01-05T09:00:00Z","rating":4},
    {"name":"Ana R.","title":"Dry skin","content":"My skin feels plump in the morning even in winter.","createdAt":"2025-12-19T09:00:00Z","rating":5,"isFeatured":true}
]"#;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nonce: String,
    pub hero_video_url: &'static str,
    pub featured_collection: Option<Collection>,
    pub recommended: Vec<Product>,
    pub before_after: &'static [BeforeAfter],
    pub testimonials: Vec<Testimonial>,
}

/// Display the home page.
///
/// Catalog sections are fetched concurrently; a failing query is logged and
/// its section omitted so the page still renders.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    let storefront = state.storefront();
    let (featured, recommended) = tokio::join!(
        storefront.get_featured_collection(),
        storefront.get_recommended_products(RECOMMENDED_COUNT),
    );

    let featured_collection = featured.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load featured collection");
        None
    });
    let recommended = recommended.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load recommended products");
        Vec::new()
    });

    HomeTemplate {
        nonce,
        hero_video_url: HERO_VIDEO_URL,
        featured_collection,
        recommended,
        before_after: BEFORE_AFTER,
        testimonials: featured_testimonials(),
    }
}

fn featured_testimonials() -> Vec<Testimonial> {
    parse_list::<Testimonial>(TESTIMONIALS_KEY, Some(HOME_TESTIMONIALS))
        .map(|items| {
            testimonials::featured(&testimonials::newest_first(items))
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_testimonials_are_the_featured_ones() {
        let picked = featured_testimonials();
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(Testimonial::is_featured));
    }
}
