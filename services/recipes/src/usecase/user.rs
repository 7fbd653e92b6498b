use recipedb_auth_types::password::hash_password;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, validate_registration};
use crate::error::RecipesServiceError;

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, RecipesServiceError> {
        validate_registration(&input.username, &input.email, &input.password)?;
        if self.repo.exists_by_username(&input.username).await? {
            return Err(RecipesServiceError::UsernameAlreadyExists);
        }
        if self.repo.exists_by_email(&input.email).await? {
            return Err(RecipesServiceError::EmailAlreadyExists);
        }
        let password_hash = hash_password(&input.password)
            .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
        let user = self
            .repo
            .create(&NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, RecipesServiceError> {
        self.repo.list().await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn by_id(&self, id: i32) -> Result<User, RecipesServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }

    pub async fn by_username(&self, username: &str) -> Result<User, RecipesServiceError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(RecipesServiceError::UserNotFound)
    }
}

// ── DeleteAccount ────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteAccountUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<(), RecipesServiceError> {
        self.repo.delete_cascade(user_id).await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
