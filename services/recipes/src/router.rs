use std::time::Duration;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    extract::Request,
    middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use recipedb_auth_types::csrf::require_csrf;
use recipedb_core::health::healthz;
use recipedb_core::middleware::{
    X_REQUEST_ID, cors_layer, handle_timeout_error, propagate_request_id_layer, request_id_layer,
};

use crate::handlers::{
    auth::{csrf_token, login, logout, me},
    comment::add_comment,
    health::readyz,
    recipe::{
        create_recipe, delete_recipe, edit_recipe, get_recipe, list_recipes,
        list_recipes_by_owner, list_recipes_by_tags,
    },
    upvote::toggle_upvote,
    user::{create_user, delete_me, get_user_by_id, get_user_by_username, list_users},
};
use crate::state::AppState;

/// HTTP settings that shape the middleware stack rather than handlers.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub cors_allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    // Registration is the only state-changing route exempt from CSRF.
    let public = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/user/create", post(create_user));

    let csrf_protected = Router::new()
        // Users
        .route("/api/user/all", get(list_users))
        .route("/api/user/i/{id}", get(get_user_by_id))
        .route("/api/user/u/{username}", get(get_user_by_username))
        .route("/api/user/me", delete(delete_me))
        // Recipes
        .route("/api/recipes/create", post(create_recipe))
        .route("/api/recipes/all", get(list_recipes))
        .route("/api/recipes/r/byId/{id}", get(get_recipe))
        .route("/api/recipes/u/{username}", get(list_recipes_by_owner))
        .route("/api/recipes/r/{id}/edit", put(edit_recipe))
        .route("/api/recipes/r/{id}/delete", delete(delete_recipe))
        .route("/api/recipes/tags", get(list_recipes_by_tags))
        .route("/api/recipes/r/{id}/comment", post(add_comment))
        .route("/api/recipes/r/{id}/upvote", post(toggle_upvote))
        // Auth
        .route("/api/auth/csrf", get(csrf_token))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn(require_csrf));

    Router::new()
        .merge(public)
        .merge(csrf_protected)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request| {
                        let request_id = request
                            .headers()
                            .get(X_REQUEST_ID)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default();
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(propagate_request_id_layer())
                .layer(cors_layer(&options.cors_allowed_origins))
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(options.request_timeout),
        )
}
