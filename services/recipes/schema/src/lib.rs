//! sea-orm entities for the recipes service.

pub mod comments;
pub mod recipe_ingredients;
pub mod recipe_tags;
pub mod recipe_upvotes;
pub mod recipes;
pub mod sessions;
pub mod users;
