//! # Video Data Transfer Objects

use auth::{PlaybackDecision, VipLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::ListMeta;

/// Query parameters for listing videos
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    pub page:          Option<u64>,
    pub limit:         Option<u64>,
    pub category_id:   Option<Uuid>,
    pub tag_id:        Option<Uuid>,
    pub keyword:       Option<String>,
    pub max_vip_level: Option<u8>,
}

/// Request body for creating a video
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Video URL is required"))]
    pub video_url: String,

    pub thumbnail_url: Option<String>,

    /// Full runtime in seconds
    pub duration: i32,

    /// Preview runtime in seconds, shown to viewers below the required tier
    pub preview_duration: i32,

    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub required_vip_level: i32,

    pub category_id: Option<Uuid>,
}

/// Request body for updating a video; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub video_url: Option<String>,

    pub thumbnail_url: Option<String>,

    pub duration: Option<i32>,

    pub preview_duration: Option<i32>,

    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub required_vip_level: Option<i32>,

    pub category_id: Option<Uuid>,

    pub is_active: Option<bool>,
}

/// A video as seen by a particular caller
///
/// `effective_duration` is the preview runtime when the caller's tier is
/// below the video's requirement, and the full runtime otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id:                  Uuid,
    pub title:               String,
    pub description:         Option<String>,
    pub video_url:           String,
    pub thumbnail_url:       Option<String>,
    pub duration:            i32,
    pub preview_duration:    i32,
    pub required_vip_level:  u8,
    pub required_level_name: String,
    pub view_count:          i32,
    pub category_id:         Option<Uuid>,
    pub can_watch:           bool,
    pub is_preview_only:     bool,
    pub effective_duration:  i32,
    pub created_at:          DateTime<Utc>,
}

impl VideoResponse {
    /// Projects a stored video through a playback decision.
    #[must_use]
    pub fn for_caller(video: entity::videos::Model, decision: PlaybackDecision) -> Self {
        let required = VipLevel::from_stored(video.required_vip_level);
        let preview_only = matches!(decision, PlaybackDecision::PreviewOnly);
        let effective_duration = if preview_only {
            video.preview_duration
        } else {
            video.duration
        };

        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            duration: video.duration,
            preview_duration: video.preview_duration,
            required_vip_level: required.rank(),
            required_level_name: required.label().to_string(),
            view_count: video.view_count,
            category_id: video.category_id,
            can_watch: !preview_only,
            is_preview_only: preview_only,
            effective_duration,
            created_at: video.created_at,
        }
    }
}

/// Paginated list of videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub items: Vec<VideoResponse>,
    pub meta:  ListMeta,
}
