use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors raised by shared middleware, before a request reaches a service handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("missing or invalid CSRF token")]
    InvalidCsrfToken,
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCsrfToken => "INVALID_CSRF_TOKEN",
            Self::Timeout => "TIMEOUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidCsrfToken => StatusCode::FORBIDDEN,
            AppError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; TraceLayer already records them.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::Timeout => tracing::warn!(kind = "TIMEOUT", "request timed out"),
            Self::InvalidCsrfToken => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
