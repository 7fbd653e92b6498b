use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recipes service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum RecipesServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("username already exists")]
    UsernameAlreadyExists,
    #[error("email already exists")]
    EmailAlreadyExists,
    #[error("upvote changed concurrently, retry")]
    UpvoteConflict,
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecipesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UpvoteConflict => "UPVOTE_CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl IntoResponse for RecipesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::RecipeNotFound => StatusCode::NOT_FOUND,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::UpvoteConflict => {
                StatusCode::CONFLICT
            }
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for RecipesServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for RecipesServiceError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for RecipesServiceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}
