//! # Authentication Handlers
//!
//! HTTP request handlers for the session endpoints.

use auth::CallerIdentity;
use axum::Json;
use error::{AppError, Result};
use validator::Validate;

use crate::{
    dto::{
        auth::{LoginRequest, LogoutRequest, RefreshRequest, SessionResponse},
        SuccessResponse,
    },
    session,
    AppState,
};

/// Inner handler for the login endpoint
///
/// This function doesn't use State extractor and accepts references to AppState.
/// It's intended to be called by wrapper handlers that use State extractor.
pub async fn login_handler_inner(
    state: &AppState,
    req: LoginRequest,
) -> Result<Json<SessionResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let response = session::login(state, &req.username, &req.password).await?;

    Ok(Json(response))
}

/// Inner handler for the logout endpoint
///
/// Only the caller's own sessions can be revoked, so an identified caller is
/// required even though the operation itself always reports success.
pub async fn logout_handler_inner(
    state: &AppState,
    caller: &CallerIdentity,
    req: LogoutRequest,
) -> Result<Json<SuccessResponse>> {
    let user_id = match caller {
        CallerIdentity::Identified {
            id, ..
        } => *id,
        CallerIdentity::Anonymous => {
            return Err(AppError::unauthorized("請先登入"));
        },
    };

    session::logout(state, user_id, req.refresh_token.as_deref()).await?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Successfully logged out".to_string(),
    }))
}

/// Inner handler for the refresh endpoint
pub async fn refresh_handler_inner(
    state: &AppState,
    req: RefreshRequest,
) -> Result<Json<SessionResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let response = session::refresh(state, &req.refresh_token).await?;

    Ok(Json(response))
}
