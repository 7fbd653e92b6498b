use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, assert_error, create_recipe, register, signup, spawn_app};

#[tokio::test]
async fn should_register_and_list_user_without_password() {
    let server = spawn_app().await;

    let response = server
        .post("/api/user/create")
        .json(&json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.text(), "User created");

    let users: Value = server.get("/api/user/all").await.json();
    assert_eq!(
        users,
        json!([{ "userID": users[0]["userID"], "username": "alice", "email": "alice@example.com" }])
    );
}

#[tokio::test]
async fn should_reject_duplicate_username_and_email() {
    let server = spawn_app().await;
    register(&server, "alice").await;

    let response = server
        .post("/api/user/create")
        .json(&json!({ "username": "alice", "email": "other@example.com", "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_error(&response.json(), "USERNAME_ALREADY_EXISTS");

    let response = server
        .post("/api/user/create")
        .json(&json!({ "username": "alice2", "email": "alice@example.com", "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_error(&response.json(), "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_malformed_registration() {
    let server = spawn_app().await;

    let response = server
        .post("/api/user/create")
        .json(&json!({ "username": "alice" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error(&response.json(), "VALIDATION");

    let response = server
        .post("/api/user/create")
        .json(&json!({ "username": "alice", "email": "nope", "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_get_user_by_id_and_username() {
    let server = spawn_app().await;
    register(&server, "alice").await;

    let by_name: Value = server.get("/api/user/u/alice").await.json();
    assert_eq!(by_name["username"], "alice");
    let id = by_name["userID"].as_i64().unwrap();

    let by_id: Value = server.get(&format!("/api/user/i/{id}")).await.json();
    assert_eq!(by_id, by_name);

    let response = server.get("/api/user/i/9999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_error(&response.json(), "USER_NOT_FOUND");

    server
        .get("/api/user/u/bob")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/user/i/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_delete_account_with_recipes_comments_and_upvotes() {
    let server = spawn_app().await;
    let alice = signup(&server, "alice").await;
    let bob = signup(&server, "bob").await;

    let alices = create_recipe(&server, &alice, "Alice's pie", &[]).await;
    let bobs = create_recipe(&server, &bob, "Bob's stew", &[]).await;
    alice
        .apply(server.post(&format!("/api/recipes/r/{bobs}/comment")))
        .json(&json!({ "text": "from alice" }))
        .await
        .assert_status(StatusCode::CREATED);
    alice
        .apply(server.post(&format!("/api/recipes/r/{bobs}/upvote")))
        .await
        .assert_status_ok();
    bob.apply(server.post(&format!("/api/recipes/r/{alices}/upvote")))
        .await
        .assert_status_ok();

    alice
        .apply(server.delete("/api/user/me"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get("/api/user/u/alice")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get(&format!("/api/recipes/r/byId/{alices}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let stew: Value = server.get(&format!("/api/recipes/r/byId/{bobs}")).await.json();
    assert_eq!(stew["upvotes"], 0);
    assert_eq!(stew["comments"], json!([]));

    // the deleted account's session is gone too
    alice
        .apply(server.get("/api/auth/me"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
