use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use recipedb_auth_types::cookie::clear_session_cookie;

use crate::domain::types::{CurrentUser, User};
use crate::error::RecipesServiceError;
use crate::handlers::extract::{AppJson, AppPath};
use crate::state::AppState;
use crate::usecase::user::{
    DeleteAccountUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserInput,
    RegisterUserUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    #[serde(rename = "userID")]
    pub user_id: i32,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

// ── POST /api/user/create ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, &'static str), RecipesServiceError> {
    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(RegisterUserInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, "User created"))
}

// ── GET /api/user/all ────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, RecipesServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /api/user/i/{id} ─────────────────────────────────────────────────────

pub async fn get_user_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.by_id(id).await?.into()))
}

// ── GET /api/user/u/{username} ───────────────────────────────────────────────

pub async fn get_user_by_username(
    State(state): State<AppState>,
    AppPath(username): AppPath<String>,
) -> Result<Json<UserResponse>, RecipesServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.by_username(&username).await?.into()))
}

// ── DELETE /api/user/me ──────────────────────────────────────────────────────

pub async fn delete_me(
    user: CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), RecipesServiceError> {
    let usecase = DeleteAccountUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(user.id).await?;
    Ok((
        clear_session_cookie(jar, state.cookie_secure),
        StatusCode::NO_CONTENT,
    ))
}
