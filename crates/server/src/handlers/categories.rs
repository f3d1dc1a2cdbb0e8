//! # Category Handlers
//!
//! Categories group videos for browsing. Lookup is public; management is
//! restricted to administrators. Deleting a category detaches its videos
//! rather than removing them.

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
        categories::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
        SuccessResponse,
    },
    policy::enforce,
    AppState,
};

async fn find_by_name(state: &AppState, name: &str) -> Result<Option<entity::categories::Model>> {
    let category = entity::categories::Entity::find()
        .filter(entity::categories::Column::Name.eq(name))
        .one(&state.db)
        .await?;
    Ok(category)
}

/// Inner handler for the category listing; alphabetical, open to everyone.
pub async fn list_categories_inner(state: &AppState) -> Result<Json<Vec<CategoryResponse>>> {
    let categories = entity::categories::Entity::find()
        .order_by_asc(entity::categories::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Inner handler for fetching a single category
pub async fn get_category_inner(state: &AppState, id: Uuid) -> Result<Json<CategoryResponse>> {
    let category = entity::categories::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("分類不存在"))?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Inner handler for creating a category; names are unique.
pub async fn create_category_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: CreateCategoryRequest,
) -> Result<Json<CategoryResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if find_by_name(state, &req.name).await?.is_some() {
        return Err(AppError::conflict("分類名稱已存在"));
    }

    let category = entity::categories::ActiveModel {
        id:          Set(Uuid::new_v4()),
        name:        Set(req.name),
        description: Set(req.description),
        created_at:  Set(Utc::now()),
    }
    .insert(&state.db)
    .await?;

    info!(category_id = %category.id, name = %category.name, "Category created");

    Ok(Json(CategoryResponse::from(category)))
}

/// Inner handler for updating a category
pub async fn update_category_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateCategoryRequest,
) -> Result<Json<CategoryResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let category = entity::categories::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("分類不存在"))?;

    let mut active: entity::categories::ActiveModel = category.clone().into();
    if let Some(name) = req.name {
        if name != category.name && find_by_name(state, &name).await?.is_some() {
            return Err(AppError::conflict("分類名稱已存在"));
        }
        active.name = Set(name);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }

    let category = active.update(&state.db).await?;

    Ok(Json(CategoryResponse::from(category)))
}

/// Inner handler for deleting a category; member videos fall back to
/// uncategorized.
pub async fn delete_category_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let result = entity::categories::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("分類不存在"));
    }

    info!(category_id = %id, "Category deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "分類已刪除".to_string(),
    }))
}
