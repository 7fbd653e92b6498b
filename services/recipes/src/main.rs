use sea_orm::Database;
use tracing::info;

use recipedb_core::config::Config;
use recipedb_core::tracing::init_tracing;
use recipedb_recipes::config::RecipesConfig;
use recipedb_recipes::router::{HttpOptions, build_router};
use recipedb_recipes::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = RecipesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        session_ttl_secs: config.session_ttl_secs,
        cookie_secure: config.cookie_secure,
    };
    let options = HttpOptions {
        cors_allowed_origins: config.cors_allowed_origins.clone(),
        request_timeout: config.request_timeout(),
    };

    let router = build_router(state, &options);
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
