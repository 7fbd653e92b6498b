use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCommentRepository, DbRecipeRepository, DbSessionRepository, DbUpvoteRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }

    pub fn upvote_repo(&self) -> DbUpvoteRepository {
        DbUpvoteRepository {
            db: self.db.clone(),
        }
    }
}
