use chrono::{Duration, Utc};

use recipedb_auth_types::session::hash_token;
use recipedb_recipes::domain::types::Session;
use recipedb_recipes::error::RecipesServiceError;
use recipedb_recipes::usecase::auth::{AuthenticateUseCase, LoginUseCase, LogoutUseCase};
use recipedb_recipes::usecase::user::DeleteAccountUseCase;

use crate::helpers::{MockStore, TEST_PASSWORD, seed_user};

const TTL: u64 = 3600;

fn login(store: &MockStore) -> LoginUseCase<MockStore, MockStore> {
    LoginUseCase {
        users: store.clone(),
        sessions: store.clone(),
        session_ttl_secs: TTL,
    }
}

fn authenticate(store: &MockStore) -> AuthenticateUseCase<MockStore, MockStore> {
    AuthenticateUseCase {
        sessions: store.clone(),
        users: store.clone(),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_open_session_storing_only_token_hash() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");

    let token = login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    assert_eq!(token.len(), 64);
    store.with(|s| {
        assert_eq!(s.sessions.len(), 1);
        let session = &s.sessions[0];
        assert_eq!(session.user_id, alice.id);
        assert_eq!(session.token_hash, hash_token(&token));
        assert_ne!(session.token_hash, token);
        let ttl = session.expires_at - session.created_at;
        assert_eq!(ttl, Duration::seconds(TTL as i64));
    });
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let store = MockStore::new();
    seed_user(&store, "alice");

    let result = login(&store).execute("alice", "wrong").await;
    assert!(
        matches!(result, Err(RecipesServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(store.with(|s| s.sessions.is_empty()));
}

#[tokio::test]
async fn should_reject_unknown_username_like_wrong_password() {
    let store = MockStore::new();

    let result = login(&store).execute("ghost", TEST_PASSWORD).await;
    assert!(matches!(result, Err(RecipesServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_purge_expired_sessions_on_login() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");
    let past = Utc::now() - Duration::hours(2);
    store.with(|s| {
        s.sessions.push(Session {
            user_id: alice.id,
            token_hash: hash_token("stale"),
            expires_at: past,
            created_at: past - Duration::hours(1),
        })
    });

    let token = login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    store.with(|s| {
        assert_eq!(s.sessions.len(), 1);
        assert_eq!(s.sessions[0].token_hash, hash_token(&token));
    });
}

// ── Authenticate ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_authenticate_live_session() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");
    let token = login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    let user = authenticate(&store).execute(&token).await.unwrap();
    assert_eq!(user.id, alice.id);
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn should_reject_unknown_token() {
    let store = MockStore::new();
    seed_user(&store, "alice");
    login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    let result = authenticate(&store).execute("not-a-session").await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_expired_session() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");
    let past = Utc::now() - Duration::seconds(1);
    store.with(|s| {
        s.sessions.push(Session {
            user_id: alice.id,
            token_hash: hash_token("expired"),
            expires_at: past,
            created_at: past - Duration::hours(1),
        })
    });

    let result = authenticate(&store).execute("expired").await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_session_of_deleted_user() {
    let store = MockStore::new();
    let alice = seed_user(&store, "alice");
    let token = login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    DeleteAccountUseCase { repo: store.clone() }
        .execute(alice.id)
        .await
        .unwrap();

    let result = authenticate(&store).execute(&token).await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_session_on_logout() {
    let store = MockStore::new();
    seed_user(&store, "alice");
    let token = login(&store).execute("alice", TEST_PASSWORD).await.unwrap();

    LogoutUseCase {
        sessions: store.clone(),
    }
    .execute(Some(&token))
    .await
    .unwrap();

    assert!(store.with(|s| s.sessions.is_empty()));
    let result = authenticate(&store).execute(&token).await;
    assert!(matches!(result, Err(RecipesServiceError::Unauthorized)));
}

#[tokio::test]
async fn should_accept_logout_without_session() {
    let store = MockStore::new();
    let usecase = LogoutUseCase { sessions: store };

    usecase.execute(None).await.unwrap();
    usecase.execute(Some("")).await.unwrap();
    usecase.execute(Some("unknown")).await.unwrap();
}
