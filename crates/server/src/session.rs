//! # Session Manager
//!
//! Orchestrates the session lifecycle: login verifies credentials and issues
//! a token pair, refresh rotates the pair (a refresh token is single-use),
//! and logout revokes one or all of a user's refresh tokens.

use auth::{hash_token, secrecy::SecretString, verify_password, TokenConfig, VipLevel};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, DbConn, EntityTrait, QueryFilter, TransactionTrait};
use tracing::{debug, info, warn};
use uuid::Uuid;

use error::{AppError, Result};

use crate::{
    dto::auth::{SessionResponse, SessionUser},
    refresh_tokens,
    AppState,
};

/// Looks up an active user by exact username and checks the password.
///
/// Unknown username and wrong password both return `InvalidCredentials`,
/// with identical client-facing text, to prevent username enumeration.
pub async fn verify_credentials(db: &DbConn, username: &str, password: &str) -> Result<entity::users::Model> {
    let user = entity::users::Entity::find()
        .filter(entity::users::Column::Username.eq(username))
        .filter(entity::users::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password = SecretString::from(password.to_string());
    verify_password(&password, &user.password_hash).map_err(|_| AppError::InvalidCredentials)?;

    Ok(user)
}

/// Authenticates a user and issues a fresh token pair.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<SessionResponse> {
    let user = verify_credentials(&state.db, username, password).await?;

    let response = issue_pair(&state.db, &state.tokens, &user).await?;

    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(response)
}

/// Revokes refresh tokens for a user.
///
/// With a specific token, only the matching record is revoked; without one,
/// every live record for the user is ("log out everywhere"). Idempotent:
/// absence of matching records is not an error.
pub async fn logout(state: &AppState, user_id: Uuid, refresh_token: Option<&str>) -> Result<()> {
    let revoked = match refresh_token {
        Some(token) => refresh_tokens::revoke_by_hash(&state.db, user_id, &hash_token(token)).await?,
        None => refresh_tokens::revoke_all_for_user(&state.db, user_id).await?,
    };

    info!(user_id = %user_id, revoked, "User logged out");

    Ok(())
}

/// Redeems a refresh token for a new token pair, retiring the old token.
///
/// The consumed record is revoked and the new one inserted inside a single
/// transaction; the compare-and-set on the revoked flag guarantees that two
/// concurrent calls with the same token cannot both succeed.
pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<SessionResponse> {
    let claims = state.tokens.verify_refresh(refresh_token).map_err(|e| {
        debug!(error = %e, "Refresh token failed verification");
        AppError::InvalidRefreshToken
    })?;

    let token_hash = hash_token(refresh_token);

    let record = match refresh_tokens::find_active(&state.db, &token_hash, claims.sub).await? {
        Some(record) => record,
        None => {
            warn_on_replay(&state.db, &token_hash).await;
            return Err(AppError::InvalidRefreshToken);
        },
    };

    // Stored expiry is distinct from the codec's own exp claim: a row with a
    // past expires_at is "expired", a missing row is "invalid".
    if record.expires_at < Utc::now() {
        debug!(record_id = record.id, "Refresh token past stored expiry");
        return Err(AppError::RefreshTokenExpired);
    }

    let user = entity::users::Entity::find_by_id(claims.sub)
        .filter(entity::users::Column::IsActive.eq(true))
        .one(&state.db)
        .await?
        .ok_or(AppError::UserInactive)?;

    let txn = state.db.begin().await?;

    // Rotation: the loser of a concurrent double-refresh observes an
    // already-revoked record here and fails.
    if !refresh_tokens::revoke(&txn, record.id).await? {
        txn.rollback().await?;
        return Err(AppError::InvalidRefreshToken);
    }

    let response = issue_pair(&txn, &state.tokens, &user).await?;

    txn.commit().await?;

    info!(user_id = %user.id, retired_record_id = record.id, "Refresh token rotated");

    Ok(response)
}

/// Mints an access/refresh pair for a user and persists the refresh token's
/// digest and expiry. Shared by login and refresh; the response never
/// carries the password hash.
async fn issue_pair<C: ConnectionTrait>(
    conn: &C,
    tokens: &TokenConfig,
    user: &entity::users::Model,
) -> Result<SessionResponse> {
    let vip_level = VipLevel::from_stored(user.vip_level);

    let access_token = tokens
        .sign_access(user.id, &user.username, vip_level, user.is_admin)
        .map_err(|e| AppError::internal(format!("Failed to sign access token: {}", e)))?;
    let refresh_token = tokens
        .sign_refresh(user.id, &user.username, vip_level, user.is_admin)
        .map_err(|e| AppError::internal(format!("Failed to sign refresh token: {}", e)))?;

    let expires_at = Utc::now() + Duration::seconds(tokens.refresh_ttl().as_secs() as i64);

    refresh_tokens::save(conn, user.id, &hash_token(&refresh_token), expires_at).await?;

    Ok(SessionResponse {
        access_token,
        refresh_token,
        user: SessionUser {
            id:        user.id,
            username:  user.username.clone(),
            vip_level: vip_level.rank(),
            is_admin:  user.is_admin,
        },
    })
}

/// A revoked token presented again is a theft signal worth logging, even
/// though no further action is taken on it yet.
async fn warn_on_replay(db: &DbConn, token_hash: &str) {
    let replayed = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::TokenHash.eq(token_hash))
        .filter(entity::refresh_tokens::Column::RevokedAt.is_not_null())
        .one(db)
        .await;

    if let Ok(Some(record)) = replayed {
        warn!(
            record_id = record.id,
            user_id = %record.user_id,
            "Revoked refresh token was presented again"
        );
    }
}
