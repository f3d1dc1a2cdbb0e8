//! # API Router Configuration
//!
//! Configures API routes for the Velvet application.

use auth::CallerIdentity;
use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    middleware,
    routing::{get, patch, post},
    Json,
    Router,
};
use error::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::AppState;

/// Creates the API router with all routes
///
/// Every route sits behind the identity middleware, which resolves the
/// caller to [`CallerIdentity`] before any handler runs. Authorization
/// itself happens per handler against that identity.
pub fn create_app_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/v1/auth/login", post(login_handler))
        .route("/api/v1/auth/logout", post(logout_handler))
        .route("/api/v1/auth/refresh", post(refresh_handler));

    // Static `/admin` segments take precedence over the `{id}` captures.
    let video_routes = Router::new()
        .route(
            "/api/v1/videos",
            get(list_videos_handler).post(create_video_handler),
        )
        .route("/api/v1/videos/admin", get(admin_list_videos_handler))
        .route("/api/v1/videos/admin/{id}", get(admin_get_video_handler))
        .route(
            "/api/v1/videos/{id}",
            get(get_video_handler)
                .patch(update_video_handler)
                .delete(delete_video_handler),
        );

    let image_routes = Router::new()
        .route(
            "/api/v1/images",
            get(list_images_handler).post(create_image_handler),
        )
        .route("/api/v1/images/admin", get(admin_list_images_handler))
        .route("/api/v1/images/admin/{id}", get(admin_get_image_handler))
        .route(
            "/api/v1/images/{id}",
            get(get_image_handler)
                .patch(update_image_handler)
                .delete(delete_image_handler),
        );

    let tag_routes = Router::new()
        .route("/api/v1/tags", get(list_tags_handler).post(create_tag_handler))
        .route(
            "/api/v1/tags/{id}",
            get(get_tag_handler)
                .patch(update_tag_handler)
                .delete(delete_tag_handler),
        );

    let category_routes = Router::new()
        .route(
            "/api/v1/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/api/v1/categories/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        );

    let user_routes = Router::new()
        .route(
            "/api/v1/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/api/v1/users/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/api/v1/users/{id}/vip-level",
            patch(update_vip_level_handler),
        );

    Router::new()
        .merge(auth_routes)
        .merge(video_routes)
        .merge(image_routes)
        .merge(tag_routes)
        .merge(category_routes)
        .merge(user_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::identity::identity_middleware,
        ))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Wrapper handler for login endpoint that uses State extractor
async fn login_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<crate::dto::auth::LoginRequest>,
) -> Result<Json<crate::dto::auth::SessionResponse>> {
    crate::handlers::auth::login_handler_inner(&state, req).await
}

/// Wrapper handler for logout endpoint that uses State extractor
async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    body: Option<Json<crate::dto::auth::LogoutRequest>>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    crate::handlers::auth::logout_handler_inner(&state, &caller, req).await
}

/// Wrapper handler for refresh endpoint that uses State extractor
async fn refresh_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<crate::dto::auth::RefreshRequest>,
) -> Result<Json<crate::dto::auth::SessionResponse>> {
    crate::handlers::auth::refresh_handler_inner(&state, req).await
}

/// Wrapper handler for the public video listing
async fn list_videos_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(params): Query<crate::dto::videos::VideoQuery>,
) -> Result<Json<crate::dto::videos::VideoListResponse>> {
    crate::handlers::videos::list_videos_inner(&state, &caller, params).await
}

/// Wrapper handler for fetching a single video
async fn get_video_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::videos::VideoResponse>> {
    crate::handlers::videos::get_video_inner(&state, &caller, id).await
}

/// Wrapper handler for fetching a single video as admin
async fn admin_get_video_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::videos::VideoResponse>> {
    crate::handlers::videos::admin_get_video_inner(&state, &caller, id).await
}

/// Wrapper handler for fetching a single image as admin
async fn admin_get_image_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::images::ImageResponse>> {
    crate::handlers::images::admin_get_image_inner(&state, &caller, id).await
}

/// Wrapper handler for the admin video listing
async fn admin_list_videos_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(params): Query<crate::dto::videos::VideoQuery>,
) -> Result<Json<crate::dto::videos::VideoListResponse>> {
    crate::handlers::videos::admin_list_videos_inner(&state, &caller, params).await
}

/// Wrapper handler for creating a video
async fn create_video_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<crate::dto::videos::CreateVideoRequest>,
) -> Result<Json<crate::dto::videos::VideoResponse>> {
    crate::handlers::videos::create_video_inner(&state, &caller, req).await
}

/// Wrapper handler for updating a video
async fn update_video_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::videos::UpdateVideoRequest>,
) -> Result<Json<crate::dto::videos::VideoResponse>> {
    crate::handlers::videos::update_video_inner(&state, &caller, id, req).await
}

/// Wrapper handler for deleting a video
async fn delete_video_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::handlers::videos::delete_video_inner(&state, &caller, id).await
}

/// Wrapper handler for the image listing
async fn list_images_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(params): Query<crate::dto::images::ImageQuery>,
) -> Result<Json<crate::dto::images::ImageListResponse>> {
    crate::handlers::images::list_images_inner(&state, &caller, params).await
}

/// Wrapper handler for fetching a single image
async fn get_image_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::images::ImageResponse>> {
    crate::handlers::images::get_image_inner(&state, &caller, id).await
}

/// Wrapper handler for the admin image listing
async fn admin_list_images_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Query(params): Query<crate::dto::images::ImageQuery>,
) -> Result<Json<crate::dto::images::ImageListResponse>> {
    crate::handlers::images::admin_list_images_inner(&state, &caller, params).await
}

/// Wrapper handler for creating an image
async fn create_image_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<crate::dto::images::CreateImageRequest>,
) -> Result<Json<crate::dto::images::ImageResponse>> {
    crate::handlers::images::create_image_inner(&state, &caller, req).await
}

/// Wrapper handler for updating an image
async fn update_image_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::images::UpdateImageRequest>,
) -> Result<Json<crate::dto::images::ImageResponse>> {
    crate::handlers::images::update_image_inner(&state, &caller, id, req).await
}

/// Wrapper handler for deleting an image
async fn delete_image_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::handlers::images::delete_image_inner(&state, &caller, id).await
}

/// Wrapper handler for the tag listing
async fn list_tags_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<crate::dto::tags::TagResponse>>> {
    crate::handlers::tags::list_tags_inner(&state).await
}

/// Wrapper handler for fetching a single tag
async fn get_tag_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::tags::TagResponse>> {
    crate::handlers::tags::get_tag_inner(&state, id).await
}

/// Wrapper handler for creating a tag
async fn create_tag_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<crate::dto::tags::CreateTagRequest>,
) -> Result<Json<crate::dto::tags::TagResponse>> {
    crate::handlers::tags::create_tag_inner(&state, &caller, req).await
}

/// Wrapper handler for renaming a tag
async fn update_tag_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::tags::UpdateTagRequest>,
) -> Result<Json<crate::dto::tags::TagResponse>> {
    crate::handlers::tags::update_tag_inner(&state, &caller, id, req).await
}

/// Wrapper handler for deleting a tag
async fn delete_tag_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::handlers::tags::delete_tag_inner(&state, &caller, id).await
}

/// Wrapper handler for the category listing
async fn list_categories_handler(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Vec<crate::dto::categories::CategoryResponse>>> {
    crate::handlers::categories::list_categories_inner(&state).await
}

/// Wrapper handler for fetching a single category
async fn get_category_handler(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::categories::CategoryResponse>> {
    crate::handlers::categories::get_category_inner(&state, id).await
}

/// Wrapper handler for creating a category
async fn create_category_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<crate::dto::categories::CreateCategoryRequest>,
) -> Result<Json<crate::dto::categories::CategoryResponse>> {
    crate::handlers::categories::create_category_inner(&state, &caller, req).await
}

/// Wrapper handler for updating a category
async fn update_category_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::categories::UpdateCategoryRequest>,
) -> Result<Json<crate::dto::categories::CategoryResponse>> {
    crate::handlers::categories::update_category_inner(&state, &caller, id, req).await
}

/// Wrapper handler for deleting a category
async fn delete_category_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::handlers::categories::delete_category_inner(&state, &caller, id).await
}

/// Wrapper handler for the user listing
async fn list_users_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<Json<Vec<crate::dto::users::UserResponse>>> {
    crate::handlers::users::list_users_inner(&state, &caller).await
}

/// Wrapper handler for fetching a single user
async fn get_user_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::users::UserResponse>> {
    crate::handlers::users::get_user_inner(&state, &caller, id).await
}

/// Wrapper handler for creating a user
async fn create_user_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Json(req): Json<crate::dto::users::CreateUserRequest>,
) -> Result<Json<crate::dto::users::UserResponse>> {
    crate::handlers::users::create_user_inner(&state, &caller, req).await
}

/// Wrapper handler for updating a user
async fn update_user_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::users::UpdateUserRequest>,
) -> Result<Json<crate::dto::users::UserResponse>> {
    crate::handlers::users::update_user_inner(&state, &caller, id, req).await
}

/// Wrapper handler for adjusting a user's VIP tier
async fn update_vip_level_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
    Json(req): Json<crate::dto::users::UpdateVipLevelRequest>,
) -> Result<Json<crate::dto::users::UserResponse>> {
    crate::handlers::users::update_vip_level_inner(&state, &caller, id, req).await
}

/// Wrapper handler for deleting a user
async fn delete_user_handler(
    AxumState(state): AxumState<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::dto::SuccessResponse>> {
    crate::handlers::users::delete_user_inner(&state, &caller, id).await
}
