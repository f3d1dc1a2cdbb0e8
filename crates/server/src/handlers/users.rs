//! # User Management Handlers
//!
//! Administrator-only account management. Passwords are hashed before they
//! touch the database; responses never carry the hash.

use auth::{hash_password, secrecy::SecretString, CallerIdentity, ResourcePolicy};
use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        users::{CreateUserRequest, UpdateUserRequest, UpdateVipLevelRequest, UserResponse},
        SuccessResponse,
    },
    policy::enforce,
    AppState,
};

fn hash_new_password(password: &str) -> Result<String> {
    use auth::secrecy::ExposeSecret as _;

    let hash = hash_password(&SecretString::from(password.to_string()), None)
        .map_err(|e| AppError::internal(format!("password hashing failed: {}", e)))?;
    Ok(hash.expose_secret().to_string())
}

/// Inner handler for the user listing; newest first.
pub async fn list_users_inner(
    state: &AppState,
    caller: &CallerIdentity,
) -> Result<Json<Vec<UserResponse>>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let users = entity::users::Entity::find()
        .order_by_desc(entity::users::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Inner handler for fetching a single user
pub async fn get_user_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<UserResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let user = entity::users::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("使用者不存在"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Inner handler for creating a user; usernames are unique.
pub async fn create_user_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: CreateUserRequest,
) -> Result<Json<UserResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let existing = entity::users::Entity::find()
        .filter(entity::users::Column::Username.eq(&req.username))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("使用者名稱已存在"));
    }

    let now = Utc::now();
    let user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        username:      Set(req.username),
        password_hash: Set(hash_new_password(&req.password)?),
        email:         Set(req.email),
        vip_level:     Set(req.vip_level.unwrap_or(1)),
        is_admin:      Set(req.is_admin.unwrap_or(false)),
        is_active:     Set(true),
        created_at:    Set(now),
        updated_at:    Set(now),
    }
    .insert(&state.db)
    .await?;

    info!(user_id = %user.id, username = %user.username, "User created");

    Ok(Json(UserResponse::from(user)))
}

/// Inner handler for updating a user
///
/// Deactivation only stops future logins and refreshes; outstanding access
/// tokens remain valid until their natural expiry.
pub async fn update_user_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateUserRequest,
) -> Result<Json<UserResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = entity::users::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("使用者不存在"))?;

    let mut active: entity::users::ActiveModel = user.into();
    if let Some(password) = req.password {
        active.password_hash = Set(hash_new_password(&password)?);
    }
    if let Some(email) = req.email {
        active.email = Set(Some(email));
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let user = active.update(&state.db).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Inner handler for adjusting a user's VIP tier
///
/// Takes effect on the next token issuance; outstanding tokens keep the
/// tier they were minted with.
pub async fn update_vip_level_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateVipLevelRequest,
) -> Result<Json<UserResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = entity::users::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("使用者不存在"))?;

    let mut active: entity::users::ActiveModel = user.into();
    active.vip_level = Set(req.vip_level);
    active.updated_at = Set(Utc::now());

    let user = active.update(&state.db).await?;

    info!(user_id = %user.id, vip_level = user.vip_level, "VIP level updated");

    Ok(Json(UserResponse::from(user)))
}

/// Inner handler for deleting a user; refresh tokens cascade with the row.
pub async fn delete_user_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let result = entity::users::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("使用者不存在"));
    }

    info!(user_id = %id, "User deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "使用者已刪除".to_string(),
    }))
}
