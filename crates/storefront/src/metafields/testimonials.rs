//! Customer testimonials, review snapshot and pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MetafieldItem, parse_timestamp};

/// Testimonials shown per page.
pub const PAGE_SIZE: usize = 6;

/// Characters of content shown before "read more".
pub const TEXT_LIMIT: usize = 200;

/// Featured testimonials shown on the home page when none are flagged.
const FEATURED_FALLBACK: usize = 3;

/// Rating assumed when a testimonial has none.
const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub content: String,
    #[serde(default)]
    pub order: Option<i64>,
    pub created_at: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

impl MetafieldItem for Testimonial {
    fn is_valid(&self) -> bool {
        !self.content.trim().is_empty() && self.created().is_some()
    }
}

impl Testimonial {
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Star rating in 1..=5, with a missing rating counted as 5.
    ///
    /// Out-of-range ratings return `None` and are left out of the per-star
    /// counts.
    #[must_use]
    pub fn effective_rating(&self) -> Option<u8> {
        match self.rating {
            None => Some(DEFAULT_RATING),
            Some(r) if r.fract() == 0.0 && (1.0..=5.0).contains(&r) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Some(r as u8)
            }
            Some(_) => None,
        }
    }

    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.is_featured == Some(true)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Verified customer")
    }

    /// Content cut at [`TEXT_LIMIT`] characters with a trailing `...`.
    #[must_use]
    pub fn excerpt(&self) -> String {
        if self.is_truncated() {
            let cut: String = self.content.chars().take(TEXT_LIMIT).collect();
            format!("{cut}...")
        } else {
            self.content.clone()
        }
    }

    /// Whether the card needs a "read more" toggle.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.content.chars().count() > TEXT_LIMIT
    }
}

/// Sort by `createdAt`, newest first.
#[must_use]
pub fn newest_first(mut items: Vec<Testimonial>) -> Vec<Testimonial> {
    items.sort_by_key(|t| std::cmp::Reverse(t.created()));
    items
}

/// Flagged testimonials, or the first three when none are flagged.
#[must_use]
pub fn featured(items: &[Testimonial]) -> Vec<&Testimonial> {
    let flagged: Vec<&Testimonial> = items.iter().filter(|t| t.is_featured()).collect();
    if flagged.is_empty() {
        items.iter().take(FEATURED_FALLBACK).collect()
    } else {
        flagged
    }
}

/// Aggregate rating for the review header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSnapshot {
    /// Mean of counted ratings, rounded to one decimal.
    pub average: f64,
    /// Number of testimonials.
    pub total: usize,
    /// Testimonials per star, index 0 is one star.
    pub counts: [usize; 5],
}

impl ReviewSnapshot {
    /// `None` when there are no testimonials.
    #[must_use]
    pub fn from_testimonials(items: &[Testimonial]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let mut counts = [0usize; 5];
        let mut sum = 0u32;
        let mut counted = 0u32;
        for rating in items.iter().filter_map(Testimonial::effective_rating) {
            if let Some(slot) = counts.get_mut(usize::from(rating - 1)) {
                *slot += 1;
                sum += u32::from(rating);
                counted += 1;
            }
        }

        let average = if counted == 0 {
            0.0
        } else {
            (f64::from(sum) / f64::from(counted) * 10.0).round() / 10.0
        };

        Some(Self {
            average,
            total: items.len(),
            counts,
        })
    }

    /// Count for a star value in 1..=5.
    #[must_use]
    pub fn count(&self, stars: u8) -> usize {
        usize::from(stars)
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Share of testimonials with `stars`, as a whole percentage.
    #[must_use]
    pub fn percent(&self, stars: u8) -> usize {
        if self.total == 0 {
            0
        } else {
            self.count(stars) * 100 / self.total
        }
    }

    /// Average formatted with one decimal.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// One page of testimonials after the optional rating filter.
#[derive(Debug, Clone)]
pub struct TestimonialPage<'a> {
    pub items: Vec<&'a Testimonial>,
    /// 1-based page, clamped to the available pages.
    pub page: usize,
    pub total_pages: usize,
    pub rating: Option<u8>,
    /// Testimonials matching the filter.
    pub matching: usize,
}

impl<'a> TestimonialPage<'a> {
    /// Select page `page` of `items` (already sorted) matching `rating`.
    #[must_use]
    pub fn build(items: &'a [Testimonial], page: usize, rating: Option<u8>) -> Self {
        let filtered: Vec<&Testimonial> = items
            .iter()
            .filter(|t| rating.is_none_or(|r| t.effective_rating() == Some(r)))
            .collect();

        let matching = filtered.len();
        let total_pages = matching.div_ceil(PAGE_SIZE).max(1);
        let page = page.clamp(1, total_pages);

        let items = filtered
            .into_iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        Self {
            items,
            page,
            total_pages,
            rating,
            matching,
        }
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
