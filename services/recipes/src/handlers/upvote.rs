use axum::{Json, extract::State};
use serde::Serialize;

use crate::domain::types::CurrentUser;
use crate::error::RecipesServiceError;
use crate::handlers::extract::AppPath;
use crate::state::AppState;
use crate::usecase::upvote::ToggleUpvoteUseCase;

#[derive(Serialize)]
pub struct UpvoteResponse {
    pub upvotes: u64,
    pub upvoted: bool,
}

// ── POST /api/recipes/r/{id}/upvote ──────────────────────────────────────────

pub async fn toggle_upvote(
    user: CurrentUser,
    State(state): State<AppState>,
    AppPath(recipe_id): AppPath<i32>,
) -> Result<Json<UpvoteResponse>, RecipesServiceError> {
    let usecase = ToggleUpvoteUseCase {
        upvotes: state.upvote_repo(),
    };
    let toggle = usecase.execute(recipe_id, &user).await?;
    Ok(Json(UpvoteResponse {
        upvotes: toggle.upvotes,
        upvoted: toggle.upvoted,
    }))
}
