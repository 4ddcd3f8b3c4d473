//! Collection type conversion functions.

use crate::shopify::types::{Collection, CollectionConnection};

use super::super::queries::fields::{CollectionFields, Connection};
use super::{convert_image, convert_page_info, convert_product_connection, convert_seo};

pub fn convert_collection(collection: CollectionFields) -> Collection {
    Collection {
        id: collection.id,
        handle: collection.handle,
        title: collection.title,
        description: collection.description,
        description_html: collection.description_html,
        image: collection.image.map(convert_image),
        seo: convert_seo(collection.seo),
        products: collection
            .products
            .map(convert_product_connection)
            .unwrap_or_default(),
    }
}

pub fn convert_collection_connection(
    connection: Connection<CollectionFields>,
) -> CollectionConnection {
    CollectionConnection {
        collections: connection
            .nodes
            .into_iter()
            .map(convert_collection)
            .collect(),
        page_info: convert_page_info(connection.page_info),
    }
}
