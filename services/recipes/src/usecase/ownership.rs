use crate::domain::repository::RecipeRepository;
use crate::error::RecipesServiceError;

/// Owner-only mutation check. Evaluated fresh on every request.
pub struct RecipeOwnershipGuard<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> RecipeOwnershipGuard<R> {
    /// `true` iff the recipe exists and its owner's username equals `username` exactly.
    pub async fn is_owner(&self, recipe_id: i32, username: &str) -> Result<bool, RecipesServiceError> {
        let owner = self.recipes.find_owner_username(recipe_id).await?;
        Ok(owner.as_deref() == Some(username))
    }

    /// `Forbidden` unless [`is_owner`](Self::is_owner) holds. A missing recipe is
    /// also `Forbidden`.
    pub async fn ensure_owner(&self, recipe_id: i32, username: &str) -> Result<(), RecipesServiceError> {
        if self.is_owner(recipe_id, username).await? {
            Ok(())
        } else {
            tracing::debug!(recipe_id, %username, "ownership check failed");
            Err(RecipesServiceError::Forbidden)
        }
    }
}
