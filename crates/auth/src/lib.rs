//! # Authentication Core
//!
//! Pure authentication and authorization building blocks:
//! - Password hashing and verification
//! - Access/refresh token codec with separate secrets and lifetimes
//! - VIP tier model and the access-control policy built on it
//!
//! Nothing in this crate performs I/O; the server crate wires these pieces
//! to the database and the HTTP layer.

pub mod password;
pub mod policy;
pub mod tokens;
pub mod vip;

// Re-export commonly used types
pub use password::{hash_password, verify_password, PasswordError};
pub use policy::{
    evaluate, evaluate_playback, AccessDecision, CallerIdentity, DenialReason, PlaybackDecision,
    ResourcePolicy,
};
pub use tokens::{extract_bearer_token, hash_token, Claims, TokenConfig, TokenError};
pub use vip::VipLevel;
pub use secrecy;
pub use subtle;
