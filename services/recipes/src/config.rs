use std::time::Duration;

use serde::Deserialize;

use recipedb_core::config::Config;

/// Recipes service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HTTP port. Env var: `RECIPES_PORT`.
    #[serde(default = "default_port")]
    pub recipes_port: u16,
    /// Session lifetime in seconds. Env var: `SESSION_TTL_SECS`.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Comma-separated browser origins allowed to make credentialed requests.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Config for RecipesConfig {}

impl RecipesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_secs() -> u64 {
    86_400
}

fn default_request_timeout_secs() -> u64 {
    30
}

pub fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_owned(),
        "http://localhost:8080".to_owned(),
    ]
}
