//! # Tag Handlers
//!
//! Tag lookup is public; tags carry no tier of their own, they only label
//! videos. Management is restricted to administrators.

use auth::{CallerIdentity, ResourcePolicy};
use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        tags::{CreateTagRequest, TagResponse, UpdateTagRequest},
        SuccessResponse,
    },
    policy::enforce,
    AppState,
};

async fn find_by_name(state: &AppState, name: &str) -> Result<Option<entity::tags::Model>> {
    let tag = entity::tags::Entity::find()
        .filter(entity::tags::Column::Name.eq(name))
        .one(&state.db)
        .await?;
    Ok(tag)
}

/// Inner handler for the tag listing; alphabetical, open to everyone.
pub async fn list_tags_inner(state: &AppState) -> Result<Json<Vec<TagResponse>>> {
    let tags = entity::tags::Entity::find()
        .order_by_asc(entity::tags::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Inner handler for fetching a single tag
pub async fn get_tag_inner(state: &AppState, id: Uuid) -> Result<Json<TagResponse>> {
    let tag = entity::tags::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("標籤不存在"))?;

    Ok(Json(TagResponse::from(tag)))
}

/// Inner handler for creating a tag; names are unique.
pub async fn create_tag_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: CreateTagRequest,
) -> Result<Json<TagResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if find_by_name(state, &req.name).await?.is_some() {
        return Err(AppError::conflict("標籤名稱已存在"));
    }

    let tag = entity::tags::ActiveModel {
        id:         Set(Uuid::new_v4()),
        name:       Set(req.name),
        created_at: Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!(tag_id = %tag.id, name = %tag.name, "Tag created");

    Ok(Json(TagResponse::from(tag)))
}

/// Inner handler for renaming a tag
pub async fn update_tag_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateTagRequest,
) -> Result<Json<TagResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tag = entity::tags::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("標籤不存在"))?;

    let mut active: entity::tags::ActiveModel = tag.clone().into();
    if let Some(name) = req.name {
        if name != tag.name && find_by_name(state, &name).await?.is_some() {
            return Err(AppError::conflict("標籤名稱已存在"));
        }
        active.name = Set(name);
    }

    let tag = active.update(&state.db).await?;

    Ok(Json(TagResponse::from(tag)))
}

/// Inner handler for deleting a tag; video links cascade with it.
pub async fn delete_tag_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let result = entity::tags::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("標籤不存在"));
    }

    info!(tag_id = %id, "Tag deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "標籤已刪除".to_string(),
    }))
}
