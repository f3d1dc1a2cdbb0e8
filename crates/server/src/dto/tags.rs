//! # Tag Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a tag
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name is required"))]
    pub name: String,
}

/// Request body for renaming a tag; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must not be empty"))]
    pub name: Option<String>,
}

/// A tag as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub id:         Uuid,
    pub name:       String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::tags::Model> for TagResponse {
    fn from(tag: entity::tags::Model) -> Self {
        Self {
            id:         tag.id,
            name:       tag.name,
            created_at: tag.created_at,
        }
    }
}
