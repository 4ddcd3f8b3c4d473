//! Product route handlers.
//!
//! The product page renders the chosen variant (from option query params,
//! e.g. `?Size=50+ml`), and the content sections parsed from the product's
//! JSON metafields. Broken metafields simply leave their section out.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Deserializer};
use tracing::instrument;
use url::form_urlencoded;

use crate::error::Result;
use crate::filters;
use crate::metafields::{
    ProductContent, QaPost, ReviewSnapshot, Testimonial, TestimonialPage, qa, testimonials,
};
use crate::middleware::CspNonce;
use crate::shopify::{Image, Product, ProductVariant, SelectedOption};
use crate::state::AppState;

/// One value of a product option, linked to the variant it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValueView {
    pub value: String,
    pub selected: bool,
    pub available: bool,
    pub href: String,
}

/// A product option (e.g. "Size") with its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub name: String,
    pub values: Vec<OptionValueView>,
}

/// Star filter chip above the testimonials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingFilter {
    pub stars: u8,
    pub count: usize,
    /// Share of all reviews, 0..=100.
    pub percent: usize,
    pub active: bool,
    pub href: String,
}

/// One rendered page of testimonials.
#[derive(Debug, Clone)]
pub struct ReviewsView {
    pub items: Vec<Testimonial>,
    pub page: usize,
    pub total_pages: usize,
    pub matching: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub clear_href: Option<String>,
    pub filters: Vec<RatingFilter>,
}

impl ReviewsView {
    fn build(
        handle: &str,
        items: &[Testimonial],
        snapshot: Option<&ReviewSnapshot>,
        page: usize,
        rating: Option<u8>,
    ) -> Self {
        let selected = TestimonialPage::build(items, page, rating);
        let base = format!("/products/{handle}/testimonials");
        let href = |page: usize, rating: Option<u8>| match rating {
            Some(r) => format!("{base}?page={page}&rating={r}"),
            None => format!("{base}?page={page}"),
        };

        let filters = snapshot
            .map(|s| {
                (1..=5u8)
                    .rev()
                    .map(|stars| RatingFilter {
                        stars,
                        count: s.count(stars),
                        percent: s.percent(stars),
                        active: rating == Some(stars),
                        href: href(1, Some(stars)),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            prev_href: selected
                .has_prev()
                .then(|| href(selected.page - 1, rating)),
            next_href: selected
                .has_next()
                .then(|| href(selected.page + 1, rating)),
            clear_href: rating.map(|_| href(1, None)),
            items: selected.items.into_iter().cloned().collect(),
            page: selected.page,
            total_pages: selected.total_pages,
            matching: selected.matching,
            filters,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nonce: String,
    pub handle: String,
    pub product: Product,
    pub variant: Option<ProductVariant>,
    pub images: Vec<Image>,
    pub options: Vec<OptionView>,
    pub content: ProductContent,
    pub snapshot: Option<ReviewSnapshot>,
    pub featured: Vec<Testimonial>,
    pub reviews: ReviewsView,
    pub questions: Vec<QaPost>,
    pub term: String,
}

/// Testimonial page fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "products/testimonials.html")]
pub struct TestimonialsFragment {
    pub handle: String,
    pub reviews: ReviewsView,
}

/// Q&A results fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "products/questions.html")]
pub struct QuestionsFragment {
    pub handle: String,
    pub questions: Vec<QaPost>,
    pub term: String,
}

/// Testimonial paging query. Blank values (`?rating=`) mean "not set".
#[derive(Debug, Deserialize)]
pub struct TestimonialQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub rating: Option<u8>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Q&A search query.
#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    #[serde(default)]
    pub q: String,
}

/// Display a product; 404 when the handle is unknown.
#[instrument(skip(state, params, nonce), fields(handle = %handle))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    CspNonce(nonce): CspNonce,
) -> Result<impl IntoResponse> {
    let product = state.storefront().get_product_by_handle(&handle).await?;

    let selection: Vec<SelectedOption> = params
        .into_iter()
        .map(|(name, value)| SelectedOption { name, value })
        .collect();
    let variant = product.select_variant(&selection).cloned();
    let options = option_views(&product, variant.as_ref());

    let content = ProductContent::from_metafields(&product.metafields);
    let snapshot = content.review_snapshot();
    let featured = testimonials::featured(&content.testimonials)
        .into_iter()
        .cloned()
        .collect();
    let reviews = ReviewsView::build(
        &product.handle,
        &content.testimonials,
        snapshot.as_ref(),
        1,
        None,
    );

    let images = if product.images.is_empty() {
        product.featured_image.iter().cloned().collect()
    } else {
        product.images.clone()
    };

    Ok(ProductShowTemplate {
        nonce,
        handle: product.handle.clone(),
        questions: content.questions.clone(),
        variant,
        images,
        options,
        snapshot,
        featured,
        reviews,
        content,
        product,
        term: String::new(),
    })
}

/// A page of testimonials, optionally filtered by star rating.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn testimonials(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<TestimonialQuery>,
) -> Result<impl IntoResponse> {
    let product = state.storefront().get_product_by_handle(&handle).await?;
    let content = ProductContent::from_metafields(&product.metafields);
    let snapshot = content.review_snapshot();
    let rating = query.rating.filter(|r| (1..=5).contains(r));

    Ok(TestimonialsFragment {
        reviews: ReviewsView::build(
            &product.handle,
            &content.testimonials,
            snapshot.as_ref(),
            query.page.unwrap_or(1),
            rating,
        ),
        handle: product.handle,
    })
}

/// Questions matching `q`, newest first.
#[instrument(skip(state), fields(handle = %handle))]
pub async fn questions(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(query): Query<QuestionQuery>,
) -> Result<impl IntoResponse> {
    let product = state.storefront().get_product_by_handle(&handle).await?;
    let content = ProductContent::from_metafields(&product.metafields);

    Ok(QuestionsFragment {
        questions: qa::search(content.questions, &query.q),
        term: query.q,
        handle: product.handle,
    })
}

/// Build option pickers around the selected variant.
fn option_views(product: &Product, selected: Option<&ProductVariant>) -> Vec<OptionView> {
    let current: &[SelectedOption] = selected.map_or(&[], |v| v.selected_options.as_slice());

    product
        .options
        .iter()
        .filter(|option| option.values.len() > 1)
        .map(|option| OptionView {
            name: option.name.clone(),
            values: option
                .values
                .iter()
                .map(|value| {
                    let mut wanted: Vec<SelectedOption> = current
                        .iter()
                        .filter(|o| !o.name.eq_ignore_ascii_case(&option.name))
                        .cloned()
                        .collect();
                    wanted.push(SelectedOption {
                        name: option.name.clone(),
                        value: value.clone(),
                    });

                    OptionValueView {
                        value: value.clone(),
                        selected: current
                            .iter()
                            .any(|o| o.name.eq_ignore_ascii_case(&option.name) && &o.value == value),
                        available: product
                            .variants
                            .iter()
                            .any(|v| v.available_for_sale && v.matches(&wanted)),
                        href: variant_href(&product.handle, &wanted),
                    }
                })
                .collect(),
        })
        .collect()
}

fn variant_href(handle: &str, selection: &[SelectedOption]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for option in selection {
        query.append_pair(&option.name, &option.value);
    }
    format!("/products/{handle}?{}", query.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use lumen_core::Price;

    use super::*;
    use crate::shopify::ProductOption;

    fn variant(id: u32, size: &str, available: bool) -> ProductVariant {
        ProductVariant {
            id: format!("gid://shopify/ProductVariant/{id}").parse().unwrap(),
            title: size.to_string(),
            available_for_sale: available,
            sku: None,
            price: Price::parse("24.90", "EUR").unwrap(),
            compare_at_price: None,
            selected_options: vec![SelectedOption {
                name: "Size".to_string(),
                value: size.to_string(),
            }],
            image: None,
        }
    }

    fn product() -> Product {
        Product {
            id: "gid://shopify/Product/1".to_string(),
            handle: "calming-serum".to_string(),
            title: "Calming Serum".to_string(),
            description: String::new(),
            description_html: String::new(),
            vendor: "Lumen".to_string(),
            product_type: "Serum".to_string(),
            tags: Vec::new(),
            available_for_sale: true,
            price: Price::parse("24.90", "EUR").unwrap(),
            compare_at_price: None,
            featured_image: None,
            images: Vec::new(),
            options: vec![ProductOption {
                name: "Size".to_string(),
                values: vec!["30 ml".to_string(), "50 ml".to_string()],
            }],
            variants: vec![variant(1, "30 ml", true), variant(2, "50 ml", false)],
            seo: crate::shopify::Seo::default(),
            metafields: crate::shopify::ProductMetafields::default(),
        }
    }

    #[test]
    fn test_option_views_mark_selection_and_availability() {
        let product = product();
        let selected = product.variants.first();
        let views = option_views(&product, selected);

        assert_eq!(views.len(), 1);
        let values = &views[0].values;
        assert!(values[0].selected);
        assert!(values[0].available);
        assert!(!values[1].selected);
        assert!(!values[1].available);
        assert_eq!(values[1].href, "/products/calming-serum?Size=50+ml");
    }

    #[test]
    fn test_reviews_view_links() {
        let items: Vec<Testimonial> = (1..=8)
            .map(|d| Testimonial {
                name: None,
                title: None,
                image_url: None,
                content: "Good".to_string(),
                order: None,
                created_at: format!("2026-01-0{d}"),
                rating: None,
                is_featured: None,
            })
            .collect();
        let snapshot = ReviewSnapshot::from_testimonials(&items);
        let view = ReviewsView::build("serum", &items, snapshot.as_ref(), 1, None);

        assert_eq!(view.items.len(), 6);
        assert_eq!(view.prev_href, None);
        assert_eq!(
            view.next_href.as_deref(),
            Some("/products/serum/testimonials?page=2")
        );
        assert_eq!(view.filters[0].stars, 5);
        assert_eq!(view.filters[0].count, 8);
        assert_eq!(view.filters[0].percent, 100);
        assert_eq!(view.filters[4].percent, 0);

        let filtered = ReviewsView::build("serum", &items, snapshot.as_ref(), 1, Some(3));
        assert_eq!(filtered.matching, 0);
        assert_eq!(
            filtered.clear_href.as_deref(),
            Some("/products/serum/testimonials?page=1")
        );
    }

    #[test]
    fn test_blank_testimonial_params_are_unset() {
        let uri: axum::http::Uri = "/products/serum/testimonials?page=2&rating=".parse().unwrap();
        let Query(query) = Query::<TestimonialQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.rating, None);

        let uri: axum::http::Uri = "/products/serum/testimonials?rating=x".parse().unwrap();
        assert!(Query::<TestimonialQuery>::try_from_uri(&uri).is_err());
    }
}
