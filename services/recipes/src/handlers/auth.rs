use axum::{Json, extract::State};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use recipedb_auth_types::cookie::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};
use recipedb_auth_types::csrf::issue_csrf_token;

use crate::domain::types::CurrentUser;
use crate::error::RecipesServiceError;
use crate::handlers::extract::AppJson;
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, LogoutUseCase};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// ── GET /api/auth/csrf ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub csrf_token: String,
}

pub async fn csrf_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<CsrfResponse>) {
    let (jar, csrf_token) = issue_csrf_token(jar, state.cookie_secure);
    (jar, Json(CsrfResponse { csrf_token }))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<StatusResponse>), RecipesServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        session_ttl_secs: state.session_ttl_secs,
    };
    let token = usecase.execute(&body.username, &body.password).await?;
    let jar = set_session_cookie(jar, token, state.session_ttl_secs, state.cookie_secure);
    Ok((jar, Json(StatusResponse { status: "ok" })))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<StatusResponse>), RecipesServiceError> {
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    usecase.execute(token.as_deref()).await?;
    Ok((
        clear_session_cookie(jar, state.cookie_secure),
        Json(StatusResponse {
            status: "logged_out",
        }),
    ))
}

// ── GET /api/auth/me ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub username: String,
}

pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: user.username,
    })
}
