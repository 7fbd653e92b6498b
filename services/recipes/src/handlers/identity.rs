//! Session-cookie identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use recipedb_auth_types::cookie::SESSION_COOKIE;

use crate::domain::types::CurrentUser;
use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::auth::AuthenticateUseCase;

/// Resolves the `recipedb_session` cookie against the session store on every
/// request. Missing, expired or revoked sessions reject with 401.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = RecipesServiceError;

    // The returned future owns the token and never borrows `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|t| !t.is_empty());
        let usecase = AuthenticateUseCase {
            sessions: state.session_repo(),
            users: state.user_repo(),
        };

        async move {
            let token = token.ok_or(RecipesServiceError::Unauthorized)?;
            usecase.execute(&token).await
        }
    }
}
