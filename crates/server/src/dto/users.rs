//! # User Management Data Transfer Objects
//!
//! Admin-facing user records. The password hash never leaves the server;
//! [`UserResponse`] carries everything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub vip_level: Option<i32>,

    pub is_admin: Option<bool>,
}

/// Request body for updating a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,

    pub is_active: Option<bool>,
}

/// Request body for adjusting a user's tier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVipLevelRequest {
    #[validate(range(min = 1, max = 6, message = "VIP level must be between 1 and 6"))]
    pub vip_level: i32,
}

/// A user record as served to administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id:         Uuid,
    pub username:   String,
    pub email:      Option<String>,
    pub vip_level:  u8,
    pub is_admin:   bool,
    pub is_active:  bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::users::Model> for UserResponse {
    fn from(user: entity::users::Model) -> Self {
        let vip_level = auth::VipLevel::from_stored(user.vip_level);
        Self {
            id:         user.id,
            username:   user.username,
            email:      user.email,
            vip_level:  vip_level.rank(),
            is_admin:   user.is_admin,
            is_active:  user.is_active,
            created_at: user.created_at,
        }
    }
}
