//! # Image Data Transfer Objects

use auth::VipLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::ListMeta;

/// Query parameters for listing images
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQuery {
    pub page:  Option<u64>,
    pub limit: Option<u64>,
}

/// Request body for creating an image
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image_url: String,

    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub required_vip_level: i32,
}

/// Request body for updating an image; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
    #[validate(length(min = 1, max = 200, message = "Title must not be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub image_url: Option<String>,

    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub required_vip_level: Option<i32>,

    pub is_active: Option<bool>,
}

/// An image record returned to an authorized caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id:                  Uuid,
    pub title:               String,
    pub description:         Option<String>,
    pub image_url:           String,
    pub required_vip_level:  u8,
    pub required_level_name: String,
    pub created_at:          DateTime<Utc>,
}

impl From<entity::images::Model> for ImageResponse {
    fn from(image: entity::images::Model) -> Self {
        let required = VipLevel::from_stored(image.required_vip_level);
        Self {
            id: image.id,
            title: image.title,
            description: image.description,
            image_url: image.image_url,
            required_vip_level: required.rank(),
            required_level_name: required.label().to_string(),
            created_at: image.created_at,
        }
    }
}

/// Paginated list of images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageListResponse {
    pub items: Vec<ImageResponse>,
    pub meta:  ListMeta,
}
