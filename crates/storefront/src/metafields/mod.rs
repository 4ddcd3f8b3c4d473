//! Lenient parsing of JSON list metafields.
//!
//! Merchants edit the `custom.*` product metafields by hand, so any of them
//! may be missing, malformed, or hold items of the wrong shape. Parsing never
//! fails a page: a broken metafield is logged and its section is omitted,
//! and individual items that do not fit the expected shape are dropped.

pub mod faq;
pub mod features;
pub mod qa;
pub mod testimonials;

pub use faq::FaqItem;
pub use features::{FeatureIcon, ProductFeature};
pub use qa::{QaAnswer, QaPost, QaVotes};
pub use testimonials::{ReviewSnapshot, Testimonial, TestimonialPage};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::shopify::ProductMetafields;

/// Metafield holding the FAQ list.
pub const FAQ_KEY: &str = "custom.faq";
/// Metafield holding customer questions and answers.
pub const QA_KEY: &str = "custom.q_a";
/// Metafield holding product feature badges.
pub const FEATURES_KEY: &str = "custom.product_features";
/// Metafield holding testimonials.
pub const TESTIMONIALS_KEY: &str = "custom.testimonials";

/// An item stored in a JSON list metafield.
pub trait MetafieldItem: DeserializeOwned {
    /// Shape check applied after deserializing.
    fn is_valid(&self) -> bool {
        true
    }
}

/// Parse a JSON list metafield.
///
/// Returns `None` when the value is missing or blank, is not valid JSON, is
/// not an array, or leaves no valid items after filtering. Invalid JSON is
/// logged at WARN with the metafield key.
pub fn parse_list<T: MetafieldItem>(key: &str, raw: Option<&str>) -> Option<Vec<T>> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(metafield = key, error = %e, "Metafield is not valid JSON");
            return None;
        }
    };

    let serde_json::Value::Array(items) = value else {
        debug!(metafield = key, "Metafield is not a JSON array");
        return None;
    };

    let total = items.len();
    let parsed: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .filter(T::is_valid)
        .collect();

    if parsed.len() < total {
        debug!(
            metafield = key,
            dropped = total - parsed.len(),
            "Dropped metafield items with unexpected shape"
        );
    }

    (!parsed.is_empty()).then_some(parsed)
}

/// Parse an ISO 8601 timestamp or a plain `YYYY-MM-DD` date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// All content sections parsed from a product's metafields.
#[derive(Debug, Clone, Default)]
pub struct ProductContent {
    /// FAQ entries sorted by `order`.
    pub faq: Vec<FaqItem>,
    /// Feature badges in merchant order.
    pub features: Vec<ProductFeature>,
    /// Questions, newest first.
    pub questions: Vec<QaPost>,
    /// Testimonials, newest first.
    pub testimonials: Vec<Testimonial>,
}

impl ProductContent {
    /// Parse every content metafield, omitting broken ones.
    #[must_use]
    pub fn from_metafields(metafields: &ProductMetafields) -> Self {
        Self {
            faq: parse_list(FAQ_KEY, metafields.faq.as_deref())
                .map(faq::sorted)
                .unwrap_or_default(),
            features: parse_list(FEATURES_KEY, metafields.product_features.as_deref())
                .unwrap_or_default(),
            questions: parse_list(QA_KEY, metafields.q_a.as_deref())
                .map(|posts| qa::search(posts, ""))
                .unwrap_or_default(),
            testimonials: parse_list(TESTIMONIALS_KEY, metafields.testimonials.as_deref())
                .map(testimonials::newest_first)
                .unwrap_or_default(),
        }
    }

    /// Review summary, when there are testimonials.
    #[must_use]
    pub fn review_snapshot(&self) -> Option<ReviewSnapshot> {
        ReviewSnapshot::from_testimonials(&self.testimonials)
    }
}
