#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use recipedb_domain::tag::Tag;

use crate::domain::types::{
    Comment, NewRecipe, NewUser, RecipePatch, RecipeView, Session, UpvoteToggle, User,
};
use crate::error::RecipesServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RecipesServiceError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, RecipesServiceError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, RecipesServiceError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RecipesServiceError>;

    /// All users, ordered by id.
    async fn list(&self) -> Result<Vec<User>, RecipesServiceError>;

    /// Insert a user. A lost uniqueness race surfaces as `UsernameAlreadyExists`
    /// or `EmailAlreadyExists`.
    async fn create(&self, user: &NewUser) -> Result<User, RecipesServiceError>;

    /// Delete the user together with their recipes (and those recipes' children),
    /// comments, upvotes and sessions, in one transaction.
    async fn delete_cascade(&self, id: i32) -> Result<(), RecipesServiceError>;
}

/// Repository for login sessions.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &Session) -> Result<(), RecipesServiceError>;

    /// Session with `token_hash` that has not expired at `now`.
    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RecipesServiceError>;

    /// Delete the session. Missing sessions are not an error.
    async fn delete(&self, token_hash: &str) -> Result<(), RecipesServiceError>;

    /// Delete the user's sessions that expired at or before `now`. Returns rows deleted.
    async fn delete_expired(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<u64, RecipesServiceError>;
}

/// Repository for recipes and their tag/ingredient sets.
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe with its tags and ingredients. Returns the new id.
    async fn create(&self, recipe: &NewRecipe) -> Result<i32, RecipesServiceError>;

    /// Owner's username, or `None` if the recipe does not exist.
    async fn find_owner_username(
        &self,
        recipe_id: i32,
    ) -> Result<Option<String>, RecipesServiceError>;

    async fn find_view(&self, recipe_id: i32) -> Result<Option<RecipeView>, RecipesServiceError>;

    /// Every recipe, ordered by id.
    async fn list_views(&self) -> Result<Vec<RecipeView>, RecipesServiceError>;

    async fn list_views_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<RecipeView>, RecipesServiceError>;

    /// Recipes carrying at least one of `tags`, ordered by id.
    async fn list_views_by_tags(
        &self,
        tags: &[Tag],
    ) -> Result<Vec<RecipeView>, RecipesServiceError>;

    /// Apply a partial update. `RecipeNotFound` if the recipe is gone.
    async fn update(&self, recipe_id: i32, patch: &RecipePatch)
    -> Result<(), RecipesServiceError>;

    /// Delete comments, upvotes, tags, ingredients, then the recipe, in one
    /// transaction. `RecipeNotFound` if the recipe is gone.
    async fn delete_cascade(&self, recipe_id: i32) -> Result<(), RecipesServiceError>;
}

/// Repository for recipe comments.
pub trait CommentRepository: Send + Sync {
    /// `RecipeNotFound` if the recipe does not exist.
    async fn create(
        &self,
        recipe_id: i32,
        author_id: i32,
        text: &str,
    ) -> Result<Comment, RecipesServiceError>;
}

/// Repository for upvotes.
pub trait UpvoteRepository: Send + Sync {
    /// Flip the `(recipe_id, user_id)` upvote and recount, in one transaction.
    ///
    /// `RecipeNotFound` / `UserNotFound` for missing parents, `UpvoteConflict`
    /// when a concurrent toggle won the uniqueness race.
    async fn toggle(
        &self,
        recipe_id: i32,
        user_id: i32,
    ) -> Result<UpvoteToggle, RecipesServiceError>;
}
