//! # Refresh Token Store
//!
//! The sole source of truth for whether a refresh token is still usable.
//! One row per issued token, keyed by digest; rows are revoked, never
//! deleted, so a replayed token remains observable.
//!
//! Functions are generic over [`ConnectionTrait`] so the session manager can
//! run them inside the rotation transaction.

use chrono::{DateTime, Utc};
use sea_orm::{prelude::*, sea_query::Expr, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;

use error::Result;

/// Persists a fresh token record. Every login and refresh produces a new
/// row; idempotency is not required.
pub async fn save<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<entity::refresh_tokens::Model> {
    let active_model = entity::refresh_tokens::ActiveModel {
        user_id: Set(user_id),
        token_hash: Set(token_hash.to_string()),
        expires_at: Set(expires_at),
        revoked_at: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = active_model.insert(conn).await?;

    Ok(model)
}

/// Finds the unrevoked record for (hash, user), if any.
///
/// Expiry is deliberately not filtered here: the session manager checks
/// `expires_at` itself because "expired but present" and "absent" surface
/// as different error kinds.
pub async fn find_active<C: ConnectionTrait>(
    conn: &C,
    token_hash: &str,
    user_id: Uuid,
) -> Result<Option<entity::refresh_tokens::Model>> {
    let record = entity::refresh_tokens::Entity::find()
        .filter(entity::refresh_tokens::Column::TokenHash.eq(token_hash))
        .filter(entity::refresh_tokens::Column::UserId.eq(user_id))
        .filter(entity::refresh_tokens::Column::RevokedAt.is_null())
        .one(conn)
        .await?;

    Ok(record)
}

/// Consumes a record: sets `revoked_at` only if it is still NULL.
///
/// Returns whether this call won. Under concurrent refresh with the same
/// token, exactly one caller sees `true`; the loser must treat the token as
/// invalid.
pub async fn revoke<C: ConnectionTrait>(conn: &C, record_id: i32) -> Result<bool> {
    let update_result = entity::refresh_tokens::Entity::update_many()
        .col_expr(
            entity::refresh_tokens::Column::RevokedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(entity::refresh_tokens::Column::Id.eq(record_id))
        .filter(entity::refresh_tokens::Column::RevokedAt.is_null())
        .exec(conn)
        .await?;

    Ok(update_result.rows_affected == 1)
}

/// Revokes the record matching (hash, user), if one is live. Used by
/// single-session logout; missing records are not an error.
pub async fn revoke_by_hash<C: ConnectionTrait>(conn: &C, user_id: Uuid, token_hash: &str) -> Result<u64> {
    let update_result = entity::refresh_tokens::Entity::update_many()
        .col_expr(
            entity::refresh_tokens::Column::RevokedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(entity::refresh_tokens::Column::UserId.eq(user_id))
        .filter(entity::refresh_tokens::Column::TokenHash.eq(token_hash))
        .filter(entity::refresh_tokens::Column::RevokedAt.is_null())
        .exec(conn)
        .await?;

    Ok(update_result.rows_affected)
}

/// Revokes every live token for a user ("log out everywhere", or a security
/// response).
pub async fn revoke_all_for_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<u64> {
    let update_result = entity::refresh_tokens::Entity::update_many()
        .col_expr(
            entity::refresh_tokens::Column::RevokedAt,
            Expr::value(Some(Utc::now())),
        )
        .filter(entity::refresh_tokens::Column::UserId.eq(user_id))
        .filter(entity::refresh_tokens::Column::RevokedAt.is_null())
        .exec(conn)
        .await?;

    Ok(update_result.rows_affected)
}
