//! # Error Response Mapping
//!
//! Converts [`AppError`] into the stable JSON body every endpoint returns on
//! failure. The body shape never changes between error kinds, only the
//! status, code, and message fields do.

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// JSON body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always false for errors
    pub success: bool,

    /// Stable machine-readable error code
    pub code: String,

    /// Human-readable message safe to show to clients
    pub message: String,
}

impl ErrorBody {
    /// Builds the body for an error.
    #[must_use]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            success: false,
            code:    err.code().to_string(),
            message: err.message(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorBody::from_error(&self);
        (status, Json(body)).into_response()
    }
}
