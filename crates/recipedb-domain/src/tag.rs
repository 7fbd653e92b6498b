//! Recipe tag vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dietary / category label attached to a recipe.
///
/// Wire and storage format: `SCREAMING_SNAKE_CASE` (e.g. `GLUTEN_FREE`).
/// Declaration order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
    Keto,
    Paleo,
    LowCarb,
    HighProtein,
    QuickEasy,
    Dessert,
    Appetizer,
}

impl Tag {
    pub const ALL: [Tag; 11] = [
        Self::Vegan,
        Self::Vegetarian,
        Self::GlutenFree,
        Self::DairyFree,
        Self::Keto,
        Self::Paleo,
        Self::LowCarb,
        Self::HighProtein,
        Self::QuickEasy,
        Self::Dessert,
        Self::Appetizer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vegan => "VEGAN",
            Self::Vegetarian => "VEGETARIAN",
            Self::GlutenFree => "GLUTEN_FREE",
            Self::DairyFree => "DAIRY_FREE",
            Self::Keto => "KETO",
            Self::Paleo => "PALEO",
            Self::LowCarb => "LOW_CARB",
            Self::HighProtein => "HIGH_PROTEIN",
            Self::QuickEasy => "QUICK_EASY",
            Self::Dessert => "DESSERT",
            Self::Appetizer => "APPETIZER",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as a [`Tag`].
#[derive(Debug, Error)]
#[error("unknown tag: {0:?}")]
pub struct UnknownTag(pub String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_owned()))
    }
}
