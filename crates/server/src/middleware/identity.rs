//! # Identity Middleware
//!
//! Resolves the caller identity for every request. Requests without an
//! Authorization header proceed as [`CallerIdentity::Anonymous`]; whether
//! anonymous access is acceptable is decided per route by its resource
//! policy, not here. A header that is present but unusable is rejected
//! outright, since a client that sent credentials expects them honored.

use auth::{extract_bearer_token, CallerIdentity, TokenError};
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::AppState;

/// Identity resolution middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header, if any
/// 2. Verifies the access token against the signing config
/// 3. Adds the resolved [`CallerIdentity`] to request extensions
/// 4. Rejects requests carrying an invalid or expired token
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match request.headers().get(header::AUTHORIZATION) {
        None => CallerIdentity::Anonymous,
        Some(header) => {
            let auth_header = match header.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return create_auth_error_response("Invalid authorization header encoding");
                },
            };

            let token = match extract_bearer_token(auth_header) {
                Some(token) => token,
                None => {
                    return create_auth_error_response("Invalid authorization header format");
                },
            };

            match state.tokens.verify_access(&token) {
                Ok(claims) => CallerIdentity::from_claims(&claims),
                Err(TokenError::Expired) => {
                    return create_auth_error_response("Token has expired");
                },
                Err(TokenError::InvalidSignature) => {
                    return create_auth_error_response("Invalid token signature");
                },
                Err(_) => {
                    return create_auth_error_response("Invalid token");
                },
            }
        },
    };

    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Create standardized authentication error response
fn create_auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        axum::Json(json!({
            "success": false,
            "code": "AUTHENTICATION_ERROR",
            "message": message
        })),
    )
        .into_response()
}
