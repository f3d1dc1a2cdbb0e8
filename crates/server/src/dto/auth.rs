//! # Authentication Data Transfer Objects
//!
//! Request and response types for the session endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for user login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account username
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,

    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for token refresh
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The refresh token to rotate
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Request body for logout
///
/// When `refresh_token` is omitted every session belonging to the caller is
/// revoked instead of just the one presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

/// User information embedded in session responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Unique user identifier
    pub id: Uuid,

    /// Account username
    pub username: String,

    /// Membership tier (1..=6)
    pub vip_level: u8,

    /// Whether the user holds administrator rights
    pub is_admin: bool,
}

/// Response containing a freshly issued token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// JWT access token for API requests
    pub access_token: String,

    /// JWT refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// The authenticated user
    pub user: SessionUser,
}
