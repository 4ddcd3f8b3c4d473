//! Product type conversion functions.

use lumen_core::Price;

use crate::shopify::types::{
    Product, ProductConnection, ProductMetafields, ProductOption, ProductVariant, SelectedOption,
};

use super::super::queries::fields::{
    Connection, MetafieldFields, PriceRangeFields, ProductFields, SelectedOptionFields,
    VariantFields,
};
use super::{convert_image, convert_page_info, convert_seo};

/// Shopify reports `0.0` as the compare-at minimum when no variant has one.
fn convert_compare_at(range: Option<PriceRangeFields>) -> Option<Price> {
    range
        .map(|r| r.min_variant_price.0)
        .filter(|price| !price.amount.is_zero())
}

fn metafield_value(field: Option<MetafieldFields>) -> Option<String> {
    field.map(|f| f.value).filter(|v| !v.trim().is_empty())
}

pub fn convert_selected_option(option: SelectedOptionFields) -> SelectedOption {
    SelectedOption {
        name: option.name,
        value: option.value,
    }
}

fn convert_variant(variant: VariantFields) -> ProductVariant {
    ProductVariant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        sku: variant.sku,
        price: variant.price.0,
        compare_at_price: variant.compare_at_price.map(|p| p.0),
        selected_options: variant
            .selected_options
            .into_iter()
            .map(convert_selected_option)
            .collect(),
        image: variant.image.map(convert_image),
    }
}

pub fn convert_product(product: ProductFields) -> Product {
    Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        description: product.description,
        description_html: product.description_html,
        vendor: product.vendor,
        product_type: product.product_type,
        tags: product.tags,
        available_for_sale: product.available_for_sale,
        price: product.price_range.min_variant_price.0,
        compare_at_price: convert_compare_at(product.compare_at_price_range),
        featured_image: product.featured_image.map(convert_image),
        images: product.images.nodes.into_iter().map(convert_image).collect(),
        options: product
            .options
            .into_iter()
            .map(|o| ProductOption {
                name: o.name,
                values: o.option_values.into_iter().map(|v| v.name).collect(),
            })
            .collect(),
        variants: product
            .variants
            .nodes
            .into_iter()
            .map(convert_variant)
            .collect(),
        seo: convert_seo(product.seo),
        metafields: ProductMetafields {
            faq: metafield_value(product.faq),
            q_a: metafield_value(product.q_a),
            product_features: metafield_value(product.product_features),
            testimonials: metafield_value(product.testimonials),
        },
    }
}

pub fn convert_product_connection(connection: Connection<ProductFields>) -> ProductConnection {
    ProductConnection {
        products: connection
            .nodes
            .into_iter()
            .map(convert_product)
            .collect(),
        page_info: convert_page_info(connection.page_info),
    }
}
