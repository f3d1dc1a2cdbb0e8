//! # Data Transfer Objects
//!
//! Request and response types for the API surface.

pub mod auth;
pub mod categories;
pub mod images;
pub mod tags;
pub mod users;
pub mod videos;

use serde::{Deserialize, Serialize};

/// Generic success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Indicates operation success
    pub success: bool,

    /// Human-readable message
    pub message: String,
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total:       u64,
    pub page:        u64,
    pub limit:       u64,
    pub total_pages: u64,
}
