use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Handler for `GET /readyz`. Ready when the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
