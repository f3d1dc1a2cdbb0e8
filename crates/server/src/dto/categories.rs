//! # Category Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name is required"))]
    pub name: String,

    pub description: Option<String>,
}

/// Request body for updating a category; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Category name must not be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,
}

/// A category as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id:          Uuid,
    pub name:        String,
    pub description: Option<String>,
    pub created_at:  DateTime<Utc>,
}

impl From<entity::categories::Model> for CategoryResponse {
    fn from(category: entity::categories::Model) -> Self {
        Self {
            id:          category.id,
            name:        category.name,
            description: category.description,
            created_at:  category.created_at,
        }
    }
}
