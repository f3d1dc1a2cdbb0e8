//! # Velvet Error Infrastructure
//!
//! Error types and API response handling for the Velvet application.

pub mod response;

pub use response::ErrorBody;

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
///
/// The three refresh-token variants (`InvalidRefreshToken`,
/// `RefreshTokenExpired`, `UserInactive`) are distinct for diagnostics but
/// share one client-facing status, code, and message so the response never
/// reveals why a presented token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("InvalidCredentials: bad username or password")]
    InvalidCredentials,

    #[error("InvalidRefreshToken: token malformed, unknown, or revoked")]
    InvalidRefreshToken,

    #[error("RefreshTokenExpired: stored token past its expiry")]
    RefreshTokenExpired,

    #[error("UserInactive: backing user missing or deactivated")]
    UserInactive,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    #[error("NotFound: {message}")]
    NotFound {
        message: String,
    },

    #[error("BadRequest: {message}")]
    BadRequest {
        message: String,
    },

    #[error("Validation: {message}")]
    Validation {
        message: String,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    #[error("Internal: {message}")]
    Internal {
        message: String,
    },

    #[error("Database: {message}")]
    Database {
        message: String,
    },

    #[error("Io: {message}")]
    Io {
        message: String,
    },

    #[error("Config: {message}")]
    Config {
        message: String,
    },

    #[error("Migration: {message}")]
    Migration {
        message: String,
    },
}

impl AppError {
    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a not found error.
    #[inline]
    pub fn not_found(message: impl ToString) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Create a conflict error.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Create a migration error.
    #[inline]
    pub fn migration(message: impl ToString) -> Self {
        Self::Migration {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::InvalidCredentials => http::StatusCode::UNAUTHORIZED,
            AppError::InvalidRefreshToken => http::StatusCode::BAD_REQUEST,
            AppError::RefreshTokenExpired => http::StatusCode::BAD_REQUEST,
            AppError::UserInactive => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized {
                ..
            } => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden {
                ..
            } => http::StatusCode::FORBIDDEN,
            AppError::NotFound {
                ..
            } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest {
                ..
            } => http::StatusCode::BAD_REQUEST,
            AppError::Validation {
                ..
            } => http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict {
                ..
            } => http::StatusCode::CONFLICT,
            AppError::Internal {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Migration {
                ..
            } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            // One code for all three, so the client cannot tell them apart.
            AppError::InvalidRefreshToken | AppError::RefreshTokenExpired | AppError::UserInactive => {
                "INVALID_REFRESH_TOKEN"
            },
            AppError::Unauthorized {
                ..
            } => "UNAUTHORIZED",
            AppError::Forbidden {
                ..
            } => "FORBIDDEN",
            AppError::NotFound {
                ..
            } => "NOT_FOUND",
            AppError::BadRequest {
                ..
            } => "BAD_REQUEST",
            AppError::Validation {
                ..
            } => "VALIDATION_ERROR",
            AppError::Conflict {
                ..
            } => "CONFLICT",
            AppError::Internal {
                ..
            } => "INTERNAL_ERROR",
            AppError::Database {
                ..
            } => "DATABASE_ERROR",
            AppError::Io {
                ..
            } => "IO_ERROR",
            AppError::Config {
                ..
            } => "CONFIG_ERROR",
            AppError::Migration {
                ..
            } => "MIGRATION_ERROR",
        }
    }

    /// Get the client-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "使用者名稱或密碼錯誤".to_string(),
            AppError::InvalidRefreshToken | AppError::RefreshTokenExpired | AppError::UserInactive => {
                "Invalid refresh token".to_string()
            },
            AppError::Unauthorized {
                message,
            } => message.clone(),
            AppError::Forbidden {
                message,
            } => message.clone(),
            AppError::NotFound {
                message,
            } => message.clone(),
            AppError::BadRequest {
                message,
            } => message.clone(),
            AppError::Validation {
                message,
            } => message.clone(),
            AppError::Conflict {
                message,
            } => message.clone(),
            AppError::Internal {
                message,
            } => message.clone(),
            AppError::Database {
                message,
            } => message.clone(),
            AppError::Io {
                message,
            } => message.clone(),
            AppError::Config {
                message,
            } => message.clone(),
            AppError::Migration {
                message,
            } => message.clone(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials() {
        let err = AppError::InvalidCredentials;
        assert_eq!(err.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "INVALID_CREDENTIALS");
        assert_eq!(err.message(), "使用者名稱或密碼錯誤");
    }

    #[test]
    fn test_refresh_token_errors_look_identical_to_clients() {
        let invalid = AppError::InvalidRefreshToken;
        let expired = AppError::RefreshTokenExpired;
        let inactive = AppError::UserInactive;

        for err in [&invalid, &expired, &inactive] {
            assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
            assert_eq!(err.code(), "INVALID_REFRESH_TOKEN");
            assert_eq!(err.message(), "Invalid refresh token");
        }

        // The internal rendering stays distinct for logs.
        assert_ne!(invalid.to_string(), expired.to_string());
        assert_ne!(expired.to_string(), inactive.to_string());
    }

    #[test]
    fn test_error_unauthorized() {
        let err = AppError::unauthorized("Token required");
        assert_eq!(err.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert_eq!(err.message(), "Token required");
    }

    #[test]
    fn test_error_forbidden() {
        let err = AppError::forbidden("Tier too low");
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("Video not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_error_validation() {
        let err = AppError::validation("vip_level out of range");
        assert_eq!(err.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_error_config() {
        let err = AppError::config("default secret outside development");
        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("Config"));
    }

    #[test]
    fn test_from_db_error() {
        let db_err = sea_orm::DbErr::Custom("connection lost".to_string());
        let err: AppError = db_err.into();
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io_err.into();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
