//! # Velvet API Server
//!
//! Axum-based HTTP API for the Velvet membership platform.
//!
//! ## Modules
//!
//! - [`session`]: login / logout / refresh orchestration
//! - [`refresh_tokens`]: persisted refresh-token store
//! - [`policy`]: maps access decisions to HTTP errors
//! - [`middleware`]: per-request caller-identity extraction
//! - [`handlers`]: content endpoints (videos, images)
//! - [`dto`]: request/response data transfer objects
//! - [`router`]: API route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod refresh_tokens;
pub mod router;
pub mod session;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:     sea_orm::DbConn,
    /// Token signing configuration, built once at startup
    pub tokens: auth::TokenConfig,
}

impl AppState {
    /// Creates the shared application state.
    #[must_use]
    pub fn new(db: sea_orm::DbConn, tokens: auth::TokenConfig) -> Self {
        Self {
            db,
            tokens,
        }
    }
}
