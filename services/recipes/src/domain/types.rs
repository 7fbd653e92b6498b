use chrono::{DateTime, Utc};

use recipedb_domain::ingredient::Ingredient;
use recipedb_domain::tag::Tag;

use crate::error::RecipesServiceError;

pub const COMMENT_MAX_LEN: usize = 1000;
pub const STEPS_MAX_LEN: usize = 5000;

// ── Users & sessions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    /// SHA-256 of the cookie token, hex encoded.
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Principal resolved from a valid session. Handed to handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: i32,
    pub steps: String,
    pub image_url: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: i32,
    pub steps: String,
    pub image_url: Option<String>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

impl NewRecipe {
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        validate_title(&self.title)?;
        validate_non_negative("prepTime", self.prep_time)?;
        validate_non_negative("cookTime", self.cook_time)?;
        validate_non_negative("servings", self.servings)?;
        validate_non_negative("difficulty", self.difficulty)?;
        validate_steps(&self.steps)
    }
}

/// Partial update. `None` leaves the stored value untouched; `Some` overwrites,
/// including `Some(vec![])` for tags and ingredients.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<i32>,
    pub steps: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
            && self.servings.is_none()
            && self.difficulty.is_none()
            && self.steps.is_none()
            && self.image_url.is_none()
            && self.tags.is_none()
            && self.ingredients.is_none()
    }

    /// Per-field checks on the present fields. A present `title` overwrites
    /// even when blank; only creation requires a non-blank title.
    pub fn validate(&self) -> Result<(), RecipesServiceError> {
        for (field, value) in [
            ("prepTime", self.prep_time),
            ("cookTime", self.cook_time),
            ("servings", self.servings),
            ("difficulty", self.difficulty),
        ] {
            if let Some(value) = value {
                validate_non_negative(field, value)?;
            }
        }
        if let Some(steps) = &self.steps {
            validate_steps(steps)?;
        }
        Ok(())
    }

    /// Apply the present fields to `recipe`.
    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(v) = &self.title {
            recipe.title = v.clone();
        }
        if let Some(v) = &self.description {
            recipe.description = v.clone();
        }
        if let Some(v) = self.prep_time {
            recipe.prep_time = v;
        }
        if let Some(v) = self.cook_time {
            recipe.cook_time = v;
        }
        if let Some(v) = self.servings {
            recipe.servings = v;
        }
        if let Some(v) = self.difficulty {
            recipe.difficulty = v;
        }
        if let Some(v) = &self.steps {
            recipe.steps = v.clone();
        }
        if let Some(v) = &self.image_url {
            recipe.image_url = Some(v.clone());
        }
        if let Some(v) = &self.tags {
            recipe.tags = normalize_set(v.clone());
        }
        if let Some(v) = &self.ingredients {
            recipe.ingredients = normalize_set(v.clone());
        }
    }
}

/// A recipe with everything the API renders alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub recipe: Recipe,
    pub owner_username: String,
    pub upvotes: u64,
    pub comments: Vec<Comment>,
}

// ── Comments & upvotes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub recipe_id: i32,
    pub author_id: i32,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a toggle: the recount and whether the caller now upvotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpvoteToggle {
    pub upvotes: u64,
    pub upvoted: bool,
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Collapse duplicates and order by declaration.
pub fn normalize_set<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort();
    values.dedup();
    values
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), RecipesServiceError> {
    if username.trim().is_empty() {
        return Err(RecipesServiceError::validation("username must not be blank"));
    }
    if email.trim().is_empty() {
        return Err(RecipesServiceError::validation("email must not be blank"));
    }
    if !email.contains('@') {
        return Err(RecipesServiceError::validation("email must contain '@'"));
    }
    if password.trim().is_empty() {
        return Err(RecipesServiceError::validation("password must not be blank"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), RecipesServiceError> {
    if title.trim().is_empty() {
        return Err(RecipesServiceError::validation("title must not be blank"));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: i32) -> Result<(), RecipesServiceError> {
    if value < 0 {
        return Err(RecipesServiceError::validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

pub fn validate_steps(steps: &str) -> Result<(), RecipesServiceError> {
    if steps.chars().count() > STEPS_MAX_LEN {
        return Err(RecipesServiceError::validation(format!(
            "steps must be at most {STEPS_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_comment_text(text: &str) -> Result<(), RecipesServiceError> {
    if text.trim().is_empty() {
        return Err(RecipesServiceError::validation("text must not be blank"));
    }
    if text.chars().count() > COMMENT_MAX_LEN {
        return Err(RecipesServiceError::validation(format!(
            "text must be at most {COMMENT_MAX_LEN} characters"
        )));
    }
    Ok(())
}
