//! # Integration Tests for the Session Lifecycle
//!
//! Exercises login, refresh rotation, and logout against a real database,
//! including the single-use guarantee on refresh tokens.

mod common;

use auth::hash_token;
use chrono::{Duration, Utc};
use common::{create_user, test_state};
use error::AppError;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use server::session;

#[tokio::test]
async fn test_login_issues_verifiable_token_pair() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 3, false).await;

    let response = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    let claims = state
        .tokens
        .verify_access(&response.access_token)
        .expect("Access token should verify");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.vip_level.rank(), 3);
    assert!(!claims.is_admin);
    assert!(claims.exp > claims.iat);

    assert_eq!(response.user.id, user.id);
    assert_eq!(response.user.vip_level, 3);

    // The refresh token is persisted as a digest, never in plaintext
    let stored = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::UserId.eq(user.id))
        .one(&state.db)
        .await
        .expect("Query should succeed")
        .expect("A refresh token row should exist");
    assert_eq!(stored.token_hash, hash_token(&response.refresh_token));
    assert!(stored.revoked_at.is_none());
    assert!(stored.expires_at > Utc::now());
}

#[tokio::test]
async fn test_back_to_back_logins_issue_distinct_tokens() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 2, false).await;

    // Claim timestamps have whole-second resolution, so both pairs are
    // almost certainly minted within the same second; each issuance must
    // still produce a unique token and a unique stored digest.
    let first = session::login(&state, "alice", "correct horse")
        .await
        .expect("First login should succeed");
    let second = session::login(&state, "alice", "correct horse")
        .await
        .expect("Second login should succeed");

    assert_ne!(first.refresh_token, second.refresh_token);

    let stored = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::UserId.eq(user.id))
        .all(&state.db)
        .await
        .expect("Query should succeed");
    assert_eq!(stored.len(), 2);

    // Both sessions stay independently redeemable
    session::refresh(&state, &first.refresh_token)
        .await
        .expect("First session should refresh");
    session::refresh(&state, &second.refresh_token)
        .await
        .expect("Second session should refresh");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let state = test_state().await;
    create_user(&state.db, "alice", "correct horse", 1, false).await;

    let wrong_password = session::login(&state, "alice", "battery staple")
        .await
        .unwrap_err();
    let unknown_user = session::login(&state, "mallory", "battery staple")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_user, AppError::InvalidCredentials));
    assert_eq!(wrong_password.message(), unknown_user.message());
    assert_eq!(wrong_password.status(), unknown_user.status());
}

#[tokio::test]
async fn test_login_rejects_deactivated_account() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let mut active: entity::users::ActiveModel = user.into();
    active.is_active = Set(false);
    active
        .update(&state.db)
        .await
        .expect("Update should succeed");

    let err = session::login(&state, "alice", "correct horse")
        .await
        .unwrap_err();
    // Deactivation must not be observable through the login error
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_refresh_rotates_and_consumes_the_old_token() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 2, false).await;

    let first = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    let second = session::refresh(&state, &first.refresh_token)
        .await
        .expect("First refresh should succeed");
    assert_ne!(first.refresh_token, second.refresh_token);

    // The spent token is single-use
    let replay = session::refresh(&state, &first.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(replay, AppError::InvalidRefreshToken));

    // Bookkeeping: old row revoked, new row live
    let old_row = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::TokenHash.eq(hash_token(&first.refresh_token)))
        .one(&state.db)
        .await
        .expect("Query should succeed")
        .expect("Old row should be retained");
    assert!(old_row.revoked_at.is_some());

    let new_row = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::TokenHash.eq(hash_token(&second.refresh_token)))
        .one(&state.db)
        .await
        .expect("Query should succeed")
        .expect("New row should exist");
    assert!(new_row.revoked_at.is_none());
    assert_eq!(new_row.user_id, user.id);
    assert_ne!(old_row.id, new_row.id);

    // The rotated token keeps working
    session::refresh(&state, &second.refresh_token)
        .await
        .expect("Rotated token should refresh");
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token() {
    let state = test_state().await;
    create_user(&state.db, "alice", "correct horse", 1, false).await;

    let err = session::refresh(&state, "not-a-jwt").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRefreshToken));
}

#[tokio::test]
async fn test_refresh_rejects_token_signed_with_access_secret() {
    let state = test_state().await;
    create_user(&state.db, "alice", "correct horse", 1, false).await;

    let response = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    // An access token must never pass as a refresh token
    let err = session::refresh(&state, &response.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRefreshToken));
}

#[tokio::test]
async fn test_refresh_fails_when_store_row_expired() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let response = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    // Age the stored row past its expiry while the JWT itself is still valid
    entity::refresh_tokens::Entity::update_many()
        .col_expr(
            entity::refresh_tokens::Column::ExpiresAt,
            sea_orm::sea_query::Expr::value(Utc::now() - Duration::days(1)),
        )
        .filter(entity::refresh_tokens::Column::UserId.eq(user.id))
        .exec(&state.db)
        .await
        .expect("Update should succeed");

    let err = session::refresh(&state, &response.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RefreshTokenExpired));
    // Clients see the same shape as any other bad refresh token
    assert_eq!(err.code(), AppError::InvalidRefreshToken.code());
    assert_eq!(err.status(), AppError::InvalidRefreshToken.status());
}

#[tokio::test]
async fn test_refresh_rejects_deactivated_account() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let response = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    entity::users::Entity::update_many()
        .col_expr(
            entity::users::Column::IsActive,
            sea_orm::sea_query::Expr::value(false),
        )
        .filter(entity::users::Column::Id.eq(user.id))
        .exec(&state.db)
        .await
        .expect("Update should succeed");

    let err = session::refresh(&state, &response.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserInactive));
}

#[tokio::test]
async fn test_logout_with_token_revokes_only_that_session() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let phone = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");
    let laptop = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    session::logout(&state, user.id, Some(&phone.refresh_token))
        .await
        .expect("Logout should succeed");

    let phone_refresh = session::refresh(&state, &phone.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(phone_refresh, AppError::InvalidRefreshToken));

    session::refresh(&state, &laptop.refresh_token)
        .await
        .expect("The other session should survive");
}

#[tokio::test]
async fn test_logout_without_token_revokes_all_sessions() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let phone = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");
    let laptop = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    session::logout(&state, user.id, None)
        .await
        .expect("Logout should succeed");

    assert!(session::refresh(&state, &phone.refresh_token).await.is_err());
    assert!(session::refresh(&state, &laptop.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let state = test_state().await;
    let user = create_user(&state.db, "alice", "correct horse", 1, false).await;

    let response = session::login(&state, "alice", "correct horse")
        .await
        .expect("Login should succeed");

    session::logout(&state, user.id, Some(&response.refresh_token))
        .await
        .expect("First logout should succeed");
    session::logout(&state, user.id, Some(&response.refresh_token))
        .await
        .expect("Repeated logout should still succeed");
    session::logout(&state, user.id, None)
        .await
        .expect("Logout with no live sessions should still succeed");
}
