use chrono::{Duration, Utc};

use recipedb_auth_types::password::verify_password;
use recipedb_auth_types::session::{generate_token, hash_token};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::types::{CurrentUser, Session};
use crate::error::RecipesServiceError;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<U: UserRepository, S: SessionRepository> {
    pub users: U,
    pub sessions: S,
    pub session_ttl_secs: u64,
}

impl<U: UserRepository, S: SessionRepository> LoginUseCase<U, S> {
    /// Verify credentials and open a session. Returns the raw session token.
    pub async fn execute(&self, username: &str, password: &str) -> Result<String, RecipesServiceError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(RecipesServiceError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(RecipesServiceError::InvalidCredentials);
        }

        let now = Utc::now();
        let purged = self.sessions.delete_expired(user.id, now).await?;
        if purged > 0 {
            tracing::debug!(user_id = user.id, purged, "purged expired sessions");
        }

        let token = generate_token();
        self.sessions
            .create(&Session {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at: now + Duration::seconds(self.session_ttl_secs as i64),
                created_at: now,
            })
            .await?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(token)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    /// Revoke the session behind `token`, if any.
    pub async fn execute(&self, token: Option<&str>) -> Result<(), RecipesServiceError> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.sessions.delete(&hash_token(token)).await?;
        }
        Ok(())
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<S: SessionRepository, U: UserRepository> {
    pub sessions: S,
    pub users: U,
}

impl<S: SessionRepository, U: UserRepository> AuthenticateUseCase<S, U> {
    /// Resolve a session token to its user. Expired or unknown sessions and
    /// deleted users are all `Unauthorized`.
    pub async fn execute(&self, token: &str) -> Result<CurrentUser, RecipesServiceError> {
        let session = self
            .sessions
            .find_active(&hash_token(token), Utc::now())
            .await?
            .ok_or(RecipesServiceError::Unauthorized)?;
        let user = self
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or(RecipesServiceError::Unauthorized)?;
        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}
