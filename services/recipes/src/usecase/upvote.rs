use crate::domain::repository::UpvoteRepository;
use crate::domain::types::{CurrentUser, UpvoteToggle};
use crate::error::RecipesServiceError;

pub struct ToggleUpvoteUseCase<R: UpvoteRepository> {
    pub upvotes: R,
}

impl<R: UpvoteRepository> ToggleUpvoteUseCase<R> {
    /// Flip the caller's upvote on `recipe_id`. Applying it twice restores the
    /// original count and state.
    pub async fn execute(
        &self,
        recipe_id: i32,
        user: &CurrentUser,
    ) -> Result<UpvoteToggle, RecipesServiceError> {
        let result = self.upvotes.toggle(recipe_id, user.id).await;
        match &result {
            Ok(toggle) => tracing::info!(
                recipe_id,
                user_id = user.id,
                upvotes = toggle.upvotes,
                upvoted = toggle.upvoted,
                "upvote toggled"
            ),
            Err(RecipesServiceError::UpvoteConflict) => {
                tracing::warn!(recipe_id, user_id = user.id, "concurrent upvote toggle")
            }
            Err(_) => {}
        }
        result
    }
}
