//! Skincare-profile vocabulary collected by the quiz.
//!
//! Every answer is a closed set of options. Values serialize in
//! `SCREAMING_SNAKE_CASE`, which is also the form value posted by the quiz
//! templates, so the session JSON and the HTML forms share one spelling.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A form or stored value that is not one of the allowed options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} option: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Defines a profile enum with its wire spelling and display label.
macro_rules! profile_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All options in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire spelling (form value and JSON value).
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            /// Human-readable label.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownOption {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

profile_enum! {
    /// Self-reported skin type.
    SkinType, "skin type" {
        Oily => "OILY", "Oily skin";
        Dry => "DRY", "Dry skin";
        Combination => "COMBINATION", "Combination skin";
        Sensitive => "SENSITIVE", "Sensitive skin";
    }
}

profile_enum! {
    /// How often the customer exfoliates.
    ExfoliationFrequency, "exfoliation frequency" {
        Never => "NEVER", "Never";
        Weekly => "WEEKLY", "Weekly";
        TwoToThreeTimesWeek => "TWO_TO_THREE_TIMES_WEEK", "2-3 times a week";
    }
}

profile_enum! {
    /// Exfoliant product families.
    ExfoliantType, "exfoliant" {
        PhysicalScrubs => "PHYSICAL_SCRUBS", "Physical scrubs";
        ChemicalExfoliants => "CHEMICAL_EXFOLIANTS", "Chemical exfoliants (AHA/BHA)";
        EnzymeExfoliators => "ENZYME_EXFOLIATORS", "Enzyme exfoliators";
    }
}

profile_enum! {
    /// Age bracket.
    AgeGroup, "age group" {
        Teens => "TEENS", "Teens (13-19)";
        Twenties => "TWENTIES", "20s";
        Thirties => "THIRTIES", "30s";
        Forties => "FORTIES", "40s";
        Fifties => "FIFTIES", "50s";
        SixtiesPlus => "SIXTIES_PLUS", "60 and over";
    }
}

profile_enum! {
    /// Environment that affects the skin most.
    ClimateType, "climate" {
        Arid => "ARID", "Dry climate";
        Humid => "HUMID", "Humid climate";
        Urban => "URBAN", "Urban environment";
    }
}

profile_enum! {
    /// Sleep quality.
    SleepHabits, "sleep habits" {
        Good => "GOOD", "Regular sleep schedule";
        Irregular => "IRREGULAR", "Irregular sleep pattern";
        Poor => "POOR", "Poor sleep quality";
    }
}

profile_enum! {
    /// Makeup products worn.
    MakeupType, "makeup type" {
        Foundation => "FOUNDATION", "Foundation";
        Concealer => "CONCEALER", "Concealer";
        Powder => "POWDER", "Powder";
        Blush => "BLUSH", "Blush";
        Eyeshadow => "EYESHADOW", "Eyeshadow";
        Mascara => "MASCARA", "Mascara";
        Lipstick => "LIPSTICK", "Lipstick";
        Eyeliner => "EYELINER", "Eyeliner";
    }
}

profile_enum! {
    /// How often makeup is worn.
    MakeupFrequency, "makeup frequency" {
        Daily => "DAILY", "Daily";
        FewTimesWeek => "FEW_TIMES_WEEK", "A few times a week";
        WeekendsOnly => "WEEKENDS_ONLY", "Weekends only";
        SpecialOccasions => "SPECIAL_OCCASIONS", "Special occasions";
    }
}

profile_enum! {
    /// What the customer wants their routine to achieve.
    SkinGoal, "skin goal" {
        AntiAging => "ANTI_AGING", "Anti-aging";
        Acne => "ACNE", "Acne control";
        Hydration => "HYDRATION", "Hydration";
        Brightening => "BRIGHTENING", "Brightening";
        PoreMinimization => "PORE_MINIMIZATION", "Pore minimization";
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling_round_trips_through_serde() {
        let json = serde_json::to_string(&ExfoliationFrequency::TwoToThreeTimesWeek).unwrap();
        assert_eq!(json, "\"TWO_TO_THREE_TIMES_WEEK\"");
        let back: ExfoliationFrequency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExfoliationFrequency::TwoToThreeTimesWeek);
    }

    #[test]
    fn test_from_str_matches_as_str() {
        for skin in SkinType::ALL {
            assert_eq!(skin.as_str().parse::<SkinType>().unwrap(), *skin);
        }
    }

    #[test]
    fn test_unknown_option() {
        let err = "GREASY".parse::<SkinType>().unwrap_err();
        assert_eq!(err.kind, "skin type");
        assert_eq!(err.to_string(), "unknown skin type option: GREASY");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(AgeGroup::SixtiesPlus.to_string(), "60 and over");
    }
}
