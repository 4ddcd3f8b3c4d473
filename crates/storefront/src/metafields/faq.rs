//! Product FAQ entries.

use serde::{Deserialize, Serialize};

use super::MetafieldItem;

/// A question and answer written by the merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    pub order: i64,
}

impl MetafieldItem for FaqItem {
    fn is_valid(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// Sort by `order`, keeping merchant order for ties.
#[must_use]
pub fn sorted(mut items: Vec<FaqItem>) -> Vec<FaqItem> {
    items.sort_by_key(|item| item.order);
    items
}
