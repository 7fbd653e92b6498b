//! Domain types shared across recipedb crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod ingredient;
pub mod tag;
