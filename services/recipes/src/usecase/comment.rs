use crate::domain::repository::CommentRepository;
use crate::domain::types::{Comment, CurrentUser, validate_comment_text};
use crate::error::RecipesServiceError;

pub struct AddCommentUseCase<C: CommentRepository> {
    pub comments: C,
}

impl<C: CommentRepository> AddCommentUseCase<C> {
    pub async fn execute(
        &self,
        recipe_id: i32,
        author: &CurrentUser,
        text: &str,
    ) -> Result<Comment, RecipesServiceError> {
        validate_comment_text(text)?;
        let comment = self.comments.create(recipe_id, author.id, text).await?;
        tracing::info!(recipe_id, comment_id = comment.id, user_id = author.id, "comment added");
        Ok(comment)
    }
}
