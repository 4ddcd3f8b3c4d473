//! Type conversion functions for Shopify Storefront API responses.

pub mod blogs;
pub mod cart;
pub mod collections;
pub mod products;
pub mod search;

pub use blogs::{convert_article, convert_blog};
pub use cart::{convert_cart, convert_user_error};
pub use collections::{convert_collection, convert_collection_connection};
pub use products::{convert_product, convert_product_connection};
pub use search::convert_predictive_search;

use crate::shopify::types::{Image, PageInfo, Seo};

use super::queries::fields::{ImageFields, PageInfoFields, SeoFields};

pub fn convert_image(image: ImageFields) -> Image {
    Image {
        url: image.url,
        alt_text: image.alt_text,
        width: image.width,
        height: image.height,
    }
}

pub fn convert_seo(seo: Option<SeoFields>) -> Seo {
    seo.map(|s| Seo {
        title: s.title,
        description: s.description,
    })
    .unwrap_or_default()
}

pub fn convert_page_info(page_info: PageInfoFields) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        has_previous_page: page_info.has_previous_page,
        start_cursor: page_info.start_cursor,
        end_cursor: page_info.end_cursor,
    }
}
