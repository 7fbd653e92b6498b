//! Double-submit CSRF protection.
//!
//! A state-changing request passes only when the `X-XSRF-TOKEN` header is
//! present and equal to the `XSRF-TOKEN` cookie.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use http::Method;
use subtle::ConstantTimeEq;

use recipedb_core::error::AppError;

use crate::cookie::{XSRF_COOKIE, set_xsrf_cookie};
use crate::session::generate_token;

pub const X_XSRF_TOKEN: &str = "x-xsrf-token";

/// Return the CSRF token already held by the client, or issue a new one.
pub fn issue_csrf_token(jar: CookieJar, secure: bool) -> (CookieJar, String) {
    match jar.get(XSRF_COOKIE).map(|c| c.value().to_owned()) {
        Some(token) if !token.is_empty() => (jar, token),
        _ => {
            let token = generate_token();
            (set_xsrf_cookie(jar, token.clone(), secure), token)
        }
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Constant-time comparison. Both sides are padded to the same length with
/// distinct fill bytes, so the time taken does not depend on which is shorter.
fn tokens_match(cookie: &str, header: &str) -> bool {
    let len = cookie.len().max(header.len());
    let mut a = vec![0u8; len];
    let mut b = vec![0xFFu8; len];
    a[..cookie.len()].copy_from_slice(cookie.as_bytes());
    b[..header.len()].copy_from_slice(header.as_bytes());

    let same_len = cookie.len().ct_eq(&header.len());
    let same_bytes = a.as_slice().ct_eq(b.as_slice());
    (same_len & same_bytes).into()
}

/// `axum::middleware::from_fn` middleware rejecting unsafe requests without a
/// matching CSRF header.
pub async fn require_csrf(
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_safe_method(request.method()) {
        return Ok(next.run(request).await);
    }

    let cookie = jar.get(XSRF_COOKIE).map(|c| c.value().to_owned());
    let header = request
        .headers()
        .get(X_XSRF_TOKEN)
        .and_then(|v| v.to_str().ok());

    let valid = match (cookie, header) {
        (Some(cookie), Some(header)) => !cookie.is_empty() && tokens_match(&cookie, header),
        _ => false,
    };
    if !valid {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "csrf check failed");
        return Err(AppError::InvalidCsrfToken);
    }

    Ok(next.run(request).await)
}
