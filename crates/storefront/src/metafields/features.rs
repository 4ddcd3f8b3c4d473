//! Product feature badges ("Vegan", "Cruelty-free", ...).

use serde::{Deserialize, Serialize};

use super::MetafieldItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeature {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl MetafieldItem for ProductFeature {
    fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Icon drawn next to a feature badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureIcon {
    Leaf,
    Ban,
    Heart,
    Slash,
    Tested,
    Check,
}

impl FeatureIcon {
    /// Sprite symbol id in `static/icons.svg`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::Ban => "ban",
            Self::Heart => "heart",
            Self::Slash => "slash",
            Self::Tested => "tested",
            Self::Check => "check",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "leaf" | "vegan" => Some(Self::Leaf),
            "ban" | "gluten-free" | "soy free" => Some(Self::Ban),
            "heart" | "cruelty-free" => Some(Self::Heart),
            "slash" | "no estrogen or added hormones" => Some(Self::Slash),
            "tested" | "dermatologist & allergy tested" => Some(Self::Tested),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl ProductFeature {
    /// Explicit `icon` wins, then a known feature name, then a check mark.
    #[must_use]
    pub fn icon(&self) -> FeatureIcon {
        self.icon
            .as_deref()
            .and_then(FeatureIcon::from_name)
            .or_else(|| FeatureIcon::from_name(&self.name))
            .unwrap_or(FeatureIcon::Check)
    }
}
