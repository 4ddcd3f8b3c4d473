//! Customer questions and answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MetafieldItem, parse_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaAnswer {
    #[serde(default)]
    pub answer_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl QaAnswer {
    /// Answers marked `official` come from the brand.
    #[must_use]
    pub fn is_official(&self) -> bool {
        self.answer_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("official"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaVotes {
    #[serde(default)]
    pub upvotes: Option<i64>,
    #[serde(default)]
    pub downvotes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaPost {
    pub question: String,
    #[serde(default)]
    pub asked_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub answers: Option<Vec<QaAnswer>>,
    #[serde(default)]
    pub votes: Option<QaVotes>,
}

impl MetafieldItem for QaPost {
    fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
    }
}

impl QaPost {
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Answers with text, in stored order.
    pub fn answers(&self) -> impl Iterator<Item = &QaAnswer> {
        self.answers
            .iter()
            .flatten()
            .filter(|a| a.content.as_deref().is_some_and(|c| !c.trim().is_empty()))
    }

    #[must_use]
    pub fn upvotes(&self) -> i64 {
        self.votes.as_ref().and_then(|v| v.upvotes).unwrap_or(0)
    }

    #[must_use]
    pub fn downvotes(&self) -> i64 {
        self.votes.as_ref().and_then(|v| v.downvotes).unwrap_or(0)
    }
}

/// Questions containing `term` (case-insensitive), newest first.
///
/// A blank term keeps every question. Undated questions sort last.
#[must_use]
pub fn search(posts: Vec<QaPost>, term: &str) -> Vec<QaPost> {
    let needle = term.trim().to_lowercase();
    let mut matches: Vec<QaPost> = posts
        .into_iter()
        .filter(|p| needle.is_empty() || p.question.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by_key(|p| std::cmp::Reverse(p.created()));
    matches
}
