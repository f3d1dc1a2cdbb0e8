//! # Image Handlers
//!
//! Image gallery endpoints. Unlike videos there is no preview fallback: the
//! gallery as a whole is gated at the Platinum tier, and each image may
//! raise the bar further. Callers below the requirement are denied outright.

use auth::{CallerIdentity, ResourcePolicy, VipLevel};
use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        images::{
            CreateImageRequest,
            ImageListResponse,
            ImageQuery,
            ImageResponse,
            UpdateImageRequest,
        },
        ListMeta,
        SuccessResponse,
    },
    policy::enforce,
    AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Gallery entry tier; individual images may require more.
const GALLERY_POLICY: ResourcePolicy = ResourcePolicy::members_at(VipLevel::PLATINUM);

fn page_params(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

/// Inner handler for the image listing
///
/// Images above the caller's tier are omitted rather than teased, matching
/// the hard-deny stance of the detail endpoint.
pub async fn list_images_inner(
    state: &AppState,
    caller: &CallerIdentity,
    params: ImageQuery,
) -> Result<Json<ImageListResponse>> {
    enforce(caller, &GALLERY_POLICY)?;

    // enforce() guarantees an identified caller here
    let caller_level = caller.vip_level().unwrap_or(VipLevel::FREE);

    let (page, limit) = page_params(params.page, params.limit);

    let paginator = entity::images::Entity::find()
        .filter(entity::images::Column::IsActive.eq(true))
        .filter(entity::images::Column::RequiredVipLevel.lte(i32::from(caller_level.rank())))
        .order_by_desc(entity::images::Column::CreatedAt)
        .paginate(&state.db, limit);

    let total = paginator.num_items().await?;
    let images = paginator.fetch_page(page - 1).await?;

    Ok(Json(ImageListResponse {
        items: images.into_iter().map(ImageResponse::from).collect(),
        meta:  ListMeta {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
    }))
}

/// Inner handler for fetching a single image
pub async fn get_image_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<ImageResponse>> {
    enforce(caller, &GALLERY_POLICY)?;

    let image = entity::images::Entity::find_by_id(id)
        .filter(entity::images::Column::IsActive.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到圖片"))?;

    let required = VipLevel::from_stored(image.required_vip_level);
    enforce(caller, &ResourcePolicy::members_at(required))?;

    Ok(Json(ImageResponse::from(image)))
}

/// Inner handler for the admin image listing; includes inactive records.
pub async fn admin_list_images_inner(
    state: &AppState,
    caller: &CallerIdentity,
    params: ImageQuery,
) -> Result<Json<ImageListResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let (page, limit) = page_params(params.page, params.limit);

    let paginator = entity::images::Entity::find()
        .order_by_desc(entity::images::Column::CreatedAt)
        .paginate(&state.db, limit);

    let total = paginator.num_items().await?;
    let images = paginator.fetch_page(page - 1).await?;

    Ok(Json(ImageListResponse {
        items: images.into_iter().map(ImageResponse::from).collect(),
        meta:  ListMeta {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
    }))
}

/// Inner handler for fetching a single image as admin; the per-image tier
/// check does not apply here.
pub async fn admin_get_image_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<ImageResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let image = entity::images::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到圖片"))?;

    Ok(Json(ImageResponse::from(image)))
}

/// Inner handler for creating an image
pub async fn create_image_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: CreateImageRequest,
) -> Result<Json<ImageResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let now = Utc::now();
    let image = entity::images::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(req.title),
        description: Set(req.description),
        image_url: Set(req.image_url),
        required_vip_level: Set(req.required_vip_level),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    info!(image_id = %image.id, title = %image.title, "Image created");

    Ok(Json(ImageResponse::from(image)))
}

/// Inner handler for updating an image
pub async fn update_image_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateImageRequest,
) -> Result<Json<ImageResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let image = entity::images::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到圖片"))?;

    let mut active: entity::images::ActiveModel = image.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(image_url) = req.image_url {
        active.image_url = Set(image_url);
    }
    if let Some(required_vip_level) = req.required_vip_level {
        active.required_vip_level = Set(required_vip_level);
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let image = active.update(&state.db).await?;

    Ok(Json(ImageResponse::from(image)))
}

/// Inner handler for deleting an image
pub async fn delete_image_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let result = entity::images::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("找不到圖片"));
    }

    info!(image_id = %id, "Image deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Image deleted".to_string(),
    }))
}
