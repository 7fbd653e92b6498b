//! Cookie builders for the session and CSRF cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "recipedb_session";

/// Cookie carrying the CSRF token. Readable by page scripts so they can echo it
/// back in the `X-XSRF-TOKEN` header.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use recipedb_auth_types::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), 86400, false);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "token");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(!cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, token: String, ttl_secs: u64, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .max_age(Duration::seconds(ttl_secs as i64))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Expire the session cookie.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use recipedb_auth_types::cookie::{clear_session_cookie, set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "token".to_string(), 86400, true);
/// let jar = clear_session_cookie(jar, true);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Set the CSRF cookie. Session-scoped, not HttpOnly.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use recipedb_auth_types::cookie::{set_xsrf_cookie, XSRF_COOKIE};
///
/// let jar = set_xsrf_cookie(CookieJar::new(), "csrf".to_string(), false);
/// let cookie = jar.get(XSRF_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "csrf");
/// assert_eq!(cookie.path(), Some("/"));
/// assert!(!cookie.http_only().unwrap_or(false));
/// ```
pub fn set_xsrf_cookie(jar: CookieJar, token: String, secure: bool) -> CookieJar {
    let cookie = Cookie::build((XSRF_COOKIE, token))
        .path("/")
        .http_only(false)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
