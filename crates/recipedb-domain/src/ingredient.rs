//! Pantry ingredient vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ingredient a recipe can list. Closed set; stored by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ingredient {
    Sugar,
    Salt,
    BlackPepper,
    Flour,
    Butter,
    OliveOil,
    Eggs,
    Milk,
    Cheese,
    Garlic,
    Onion,
    Tomato,
    Rice,
    Pasta,
    Chicken,
    Beef,
    Tofu,
    Basil,
    Lemon,
    Honey,
}

impl Ingredient {
    pub const ALL: [Ingredient; 20] = [
        Self::Sugar,
        Self::Salt,
        Self::BlackPepper,
        Self::Flour,
        Self::Butter,
        Self::OliveOil,
        Self::Eggs,
        Self::Milk,
        Self::Cheese,
        Self::Garlic,
        Self::Onion,
        Self::Tomato,
        Self::Rice,
        Self::Pasta,
        Self::Chicken,
        Self::Beef,
        Self::Tofu,
        Self::Basil,
        Self::Lemon,
        Self::Honey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sugar => "SUGAR",
            Self::Salt => "SALT",
            Self::BlackPepper => "BLACK_PEPPER",
            Self::Flour => "FLOUR",
            Self::Butter => "BUTTER",
            Self::OliveOil => "OLIVE_OIL",
            Self::Eggs => "EGGS",
            Self::Milk => "MILK",
            Self::Cheese => "CHEESE",
            Self::Garlic => "GARLIC",
            Self::Onion => "ONION",
            Self::Tomato => "TOMATO",
            Self::Rice => "RICE",
            Self::Pasta => "PASTA",
            Self::Chicken => "CHICKEN",
            Self::Beef => "BEEF",
            Self::Tofu => "TOFU",
            Self::Basil => "BASIL",
            Self::Lemon => "LEMON",
            Self::Honey => "HONEY",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as an [`Ingredient`].
#[derive(Debug, Error)]
#[error("unknown ingredient: {0:?}")]
pub struct UnknownIngredient(pub String);

impl FromStr for Ingredient {
    type Err = UnknownIngredient;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ingredient| ingredient.as_str() == s)
            .ok_or_else(|| UnknownIngredient(s.to_owned()))
    }
}
