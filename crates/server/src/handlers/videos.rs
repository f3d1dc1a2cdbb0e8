//! # Video Handlers
//!
//! Video catalogue endpoints. Listing and playback are public: callers below
//! a video's required tier still receive the record, but trimmed to its
//! preview runtime. Administration endpoints mirror the catalogue without
//! the preview overlay.

use auth::{CallerIdentity, ResourcePolicy};
use axum::Json;
use chrono::Utc;
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    JoinType,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    RelationTrait,
    Set,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        videos::{
            CreateVideoRequest,
            UpdateVideoRequest,
            VideoListResponse,
            VideoQuery,
            VideoResponse,
        },
        ListMeta,
        SuccessResponse,
    },
    policy::enforce,
    AppState,
};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// The catalogue is open to everyone; tier gating happens per record via
/// the playback decision.
const CATALOGUE_POLICY: ResourcePolicy = ResourcePolicy::PUBLIC;

fn page_params(page: Option<u64>, limit: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

fn apply_filters(
    mut query: sea_orm::Select<entity::videos::Entity>,
    params: &VideoQuery,
) -> sea_orm::Select<entity::videos::Entity> {
    if let Some(category_id) = params.category_id {
        query = query.filter(entity::videos::Column::CategoryId.eq(category_id));
    }
    if let Some(ref keyword) = params.keyword {
        if !keyword.is_empty() {
            query = query.filter(entity::videos::Column::Title.contains(keyword));
        }
    }
    if let Some(max_level) = params.max_vip_level {
        query = query.filter(entity::videos::Column::RequiredVipLevel.lte(i32::from(max_level)));
    }
    if let Some(tag_id) = params.tag_id {
        query = query
            .join(JoinType::InnerJoin, entity::videos::Relation::VideoTags.def())
            .filter(entity::video_tags::Column::TagId.eq(tag_id));
    }
    query
}

/// Inner handler for the public video listing
///
/// Anonymous callers are served too; every record is projected through the
/// caller's playback decision so below-tier videos come back preview-only.
pub async fn list_videos_inner(
    state: &AppState,
    caller: &CallerIdentity,
    params: VideoQuery,
) -> Result<Json<VideoListResponse>> {
    enforce(caller, &CATALOGUE_POLICY)?;

    let (page, limit) = page_params(params.page, params.limit);

    let query = apply_filters(
        entity::videos::Entity::find()
            .filter(entity::videos::Column::IsActive.eq(true))
            .order_by_desc(entity::videos::Column::CreatedAt),
        &params,
    );

    let paginator = query.paginate(&state.db, limit);
    let total = paginator.num_items().await?;
    let videos = paginator.fetch_page(page - 1).await?;

    let items = videos
        .into_iter()
        .map(|video| {
            let required = auth::VipLevel::from_stored(video.required_vip_level);
            let decision = auth::evaluate_playback(caller, required);
            VideoResponse::for_caller(video, decision)
        })
        .collect();

    Ok(Json(VideoListResponse {
        items,
        meta: ListMeta {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
    }))
}

/// Inner handler for fetching a single video
///
/// Increments the view counter before returning; the returned record carries
/// the incremented count.
pub async fn get_video_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<VideoResponse>> {
    enforce(caller, &CATALOGUE_POLICY)?;

    // Atomic increment; a read-modify-write here would lose counts under
    // concurrent fetches.
    let update_result = entity::videos::Entity::update_many()
        .col_expr(
            entity::videos::Column::ViewCount,
            Expr::col(entity::videos::Column::ViewCount).add(1),
        )
        .filter(entity::videos::Column::Id.eq(id))
        .filter(entity::videos::Column::IsActive.eq(true))
        .exec(&state.db)
        .await?;
    if update_result.rows_affected == 0 {
        return Err(AppError::not_found("找不到影片"));
    }

    let video = entity::videos::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到影片"))?;

    let required = auth::VipLevel::from_stored(video.required_vip_level);
    let decision = auth::evaluate_playback(caller, required);

    Ok(Json(VideoResponse::for_caller(video, decision)))
}

/// Inner handler for the admin video listing; includes inactive records.
pub async fn admin_list_videos_inner(
    state: &AppState,
    caller: &CallerIdentity,
    params: VideoQuery,
) -> Result<Json<VideoListResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let (page, limit) = page_params(params.page, params.limit);

    let query = apply_filters(
        entity::videos::Entity::find().order_by_desc(entity::videos::Column::CreatedAt),
        &params,
    );

    let paginator = query.paginate(&state.db, limit);
    let total = paginator.num_items().await?;
    let videos = paginator.fetch_page(page - 1).await?;

    let items = videos
        .into_iter()
        .map(|video| VideoResponse::for_caller(video, auth::PlaybackDecision::Full))
        .collect();

    Ok(Json(VideoListResponse {
        items,
        meta: ListMeta {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
    }))
}

/// Inner handler for fetching a single video as admin; no preview overlay,
/// inactive records included.
pub async fn admin_get_video_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<VideoResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let video = entity::videos::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到影片"))?;

    Ok(Json(VideoResponse::for_caller(
        video,
        auth::PlaybackDecision::Full,
    )))
}

/// Inner handler for creating a video
pub async fn create_video_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: CreateVideoRequest,
) -> Result<Json<VideoResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let now = Utc::now();
    let video = entity::videos::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(req.title),
        description: Set(req.description),
        video_url: Set(req.video_url),
        thumbnail_url: Set(req.thumbnail_url),
        duration: Set(req.duration),
        preview_duration: Set(req.preview_duration),
        required_vip_level: Set(req.required_vip_level),
        view_count: Set(0),
        category_id: Set(req.category_id),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    info!(video_id = %video.id, title = %video.title, "Video created");

    Ok(Json(VideoResponse::for_caller(
        video,
        auth::PlaybackDecision::Full,
    )))
}

/// Inner handler for updating a video
pub async fn update_video_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
    req: UpdateVideoRequest,
) -> Result<Json<VideoResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let video = entity::videos::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("找不到影片"))?;

    let mut active: entity::videos::ActiveModel = video.into();
    if let Some(title) = req.title {
        active.title = Set(title);
    }
    if let Some(description) = req.description {
        active.description = Set(Some(description));
    }
    if let Some(video_url) = req.video_url {
        active.video_url = Set(video_url);
    }
    if let Some(thumbnail_url) = req.thumbnail_url {
        active.thumbnail_url = Set(Some(thumbnail_url));
    }
    if let Some(duration) = req.duration {
        active.duration = Set(duration);
    }
    if let Some(preview_duration) = req.preview_duration {
        active.preview_duration = Set(preview_duration);
    }
    if let Some(required_vip_level) = req.required_vip_level {
        active.required_vip_level = Set(required_vip_level);
    }
    if let Some(category_id) = req.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(is_active) = req.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now());

    let video = active.update(&state.db).await?;

    Ok(Json(VideoResponse::for_caller(
        video,
        auth::PlaybackDecision::Full,
    )))
}

/// Inner handler for deleting a video; tag links cascade with it.
pub async fn delete_video_inner(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<Json<SuccessResponse>> {
    enforce(caller, &ResourcePolicy::ADMIN)?;

    let result = entity::videos::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("找不到影片"));
    }

    info!(video_id = %id, "Video deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Video deleted".to_string(),
    }))
}
