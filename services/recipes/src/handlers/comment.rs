use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Comment, CurrentUser};
use crate::error::RecipesServiceError;
use crate::handlers::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::usecase::comment::AddCommentUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    #[serde(rename = "recipeID")]
    pub recipe_id: i32,
    pub text: String,
    pub author_username: String,
    #[serde(serialize_with = "recipedb_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            recipe_id: comment.recipe_id,
            text: comment.text,
            author_username: comment.author_username,
            created_at: comment.created_at,
        }
    }
}

// ── POST /api/recipes/r/{id}/comment ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

pub async fn add_comment(
    user: CurrentUser,
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
    AppJson(body): AppJson<AddCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), RecipesServiceError> {
    let usecase = AddCommentUseCase {
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(recipe_id, &user, &body.text).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}
