use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{Value, json};

use recipedb_auth_types::cookie::{SESSION_COOKIE, XSRF_COOKIE};

use crate::helpers::{
    PASSWORD, anonymous, assert_error, login, recipe_body, register, signup, spawn_app,
};

#[tokio::test]
async fn should_serve_health_probes() {
    let server = spawn_app().await;

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let server = spawn_app().await;

    let response = server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn should_reuse_csrf_token_held_by_client() {
    let server = spawn_app().await;
    let client = anonymous(&server).await;

    let body: Value = client.apply(server.get("/api/auth/csrf")).await.json();
    assert_eq!(body["csrfToken"], client.csrf.as_str());
}

#[tokio::test]
async fn should_login_and_resolve_me() {
    let server = spawn_app().await;
    let alice = signup(&server, "alice").await;

    let me: Value = alice.apply(server.get("/api/auth/me")).await.json();
    assert_eq!(me, json!({ "username": "alice" }));
}

#[tokio::test]
async fn should_set_http_only_session_cookie() {
    let server = spawn_app().await;
    register(&server, "alice").await;
    let client = anonymous(&server).await;

    let response = client
        .apply(server.post("/api/auth/login"))
        .json(&json!({ "username": "alice", "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));

    let cookie = response.cookie(SESSION_COOKIE);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.value().len(), 64);
}

#[tokio::test]
async fn should_reject_bad_credentials() {
    let server = spawn_app().await;
    register(&server, "alice").await;
    let client = anonymous(&server).await;

    let wrong_password = client
        .apply(server.post("/api/auth/login"))
        .json(&json!({ "username": "alice", "password": "nope" }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    assert_error(&wrong_password.json(), "INVALID_CREDENTIALS");

    let unknown_user = client
        .apply(server.post("/api/auth/login"))
        .json(&json!({ "username": "mallory", "password": PASSWORD }))
        .await;
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.json::<Value>(), wrong_password.json::<Value>());
}

#[tokio::test]
async fn should_reject_me_without_session() {
    let server = spawn_app().await;

    let response = server.get("/api/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_error(&response.json(), "UNAUTHORIZED");

    let mut forged = anonymous(&server).await;
    forged.session = Some("deadbeef".into());
    forged
        .apply(server.get("/api/auth/me"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_revoke_session_on_logout() {
    let server = spawn_app().await;
    let alice = signup(&server, "alice").await;

    let response = alice.apply(server.post("/api/auth/logout")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "status": "logged_out" }));
    assert_eq!(response.cookie(SESSION_COOKIE).value(), "");

    alice
        .apply(server.get("/api/auth/me"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_keep_other_sessions_after_logout() {
    let server = spawn_app().await;
    let laptop = signup(&server, "alice").await;
    let phone = login(&server, "alice").await;

    laptop
        .apply(server.post("/api/auth/logout"))
        .await
        .assert_status_ok();

    phone
        .apply(server.get("/api/auth/me"))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_reject_state_change_without_matching_csrf_header() {
    let server = spawn_app().await;
    let alice = signup(&server, "alice").await;
    let session = alice.session.clone().unwrap();

    let missing_header = server
        .post("/api/recipes/create")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&format!("{XSRF_COOKIE}={}; {SESSION_COOKIE}={session}", alice.csrf))
                .unwrap(),
        )
        .json(&recipe_body("Sneaky", &[]))
        .await;
    missing_header.assert_status(StatusCode::FORBIDDEN);
    assert_error(&missing_header.json(), "INVALID_CSRF_TOKEN");

    let mismatched = server
        .post("/api/recipes/create")
        .add_header(
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&format!("{XSRF_COOKIE}={}; {SESSION_COOKIE}={session}", alice.csrf))
                .unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-xsrf-token"),
            HeaderValue::from_static("tampered"),
        )
        .json(&recipe_body("Sneaky", &[]))
        .await;
    mismatched.assert_status(StatusCode::FORBIDDEN);

    let recipes: Value = server.get("/api/recipes/all").await.json();
    assert_eq!(recipes, json!([]));
}

#[tokio::test]
async fn should_require_csrf_for_login_but_not_registration() {
    let server = spawn_app().await;
    register(&server, "alice").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_error(&response.json(), "INVALID_CSRF_TOKEN");
}
