//! # Token Codec
//!
//! Signs and verifies the two bearer-token classes. Access and refresh
//! tokens carry the same claims but are signed with distinct secrets and
//! lifetimes; verification failures are distinguishable so callers can
//! special-case expiry.

use std::time::{Duration, SystemTime};

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::vip::VipLevel;

/// Fallback applied when a TTL string does not match `^\d+[dhms]$`.
///
/// This is deliberate policy, not silent failure: a misconfigured lifetime
/// degrades to 30 days instead of refusing to issue tokens.
pub const FALLBACK_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Token verification and signing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Claims carried in every signed token.
///
/// These are stateless: no server-side record exists for an access token,
/// so it cannot be revoked before its natural expiry. The short access TTL
/// is the compensating control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,

    /// Username at issue time
    pub username: String,

    /// VIP tier at issue time
    pub vip_level: VipLevel,

    /// Admin flag at issue time
    pub is_admin: bool,

    /// Per-issuance nonce. Claim timestamps have whole-second resolution,
    /// so without this two tokens minted in the same second for the same
    /// user would be byte-identical and collide in the refresh-token store.
    pub jti: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Signing configuration for both token classes.
///
/// Constructed once at process start and passed by reference into the
/// session manager; signing and verification never consult ambient state.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    access_secret:  String,
    refresh_secret: String,
    access_ttl:     Duration,
    refresh_ttl:    Duration,
}

impl TokenConfig {
    /// Creates a config from raw secrets and TTL strings (`7d`, `12h`,
    /// `30m`, `45s`). Unparseable TTLs fall back to [`FALLBACK_TTL`].
    #[must_use]
    pub fn new(access_secret: impl Into<String>, access_ttl: &str, refresh_secret: impl Into<String>, refresh_ttl: &str) -> Self {
        Self {
            access_secret:  access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl:     parse_ttl(access_ttl),
            refresh_ttl:    parse_ttl(refresh_ttl),
        }
    }

    /// Access-token lifetime.
    #[must_use]
    pub fn access_ttl(&self) -> Duration { self.access_ttl }

    /// Refresh-token lifetime.
    #[must_use]
    pub fn refresh_ttl(&self) -> Duration { self.refresh_ttl }

    /// Signs an access token for the given identity.
    pub fn sign_access(&self, user_id: Uuid, username: &str, vip_level: VipLevel, is_admin: bool) -> Result<String, TokenError> {
        sign(user_id, username, vip_level, is_admin, &self.access_secret, self.access_ttl)
    }

    /// Signs a refresh token for the given identity.
    pub fn sign_refresh(&self, user_id: Uuid, username: &str, vip_level: VipLevel, is_admin: bool) -> Result<String, TokenError> {
        sign(user_id, username, vip_level, is_admin, &self.refresh_secret, self.refresh_ttl)
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> { verify(token, &self.access_secret) }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> { verify(token, &self.refresh_secret) }
}

fn sign(
    user_id: Uuid,
    username: &str,
    vip_level: VipLevel,
    is_admin: bool,
    secret: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| TokenError::Signing(format!("failed to get current time: {}", e)))?;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        vip_level,
        is_admin,
        jti: Uuid::new_v4(),
        iat: now.as_secs(),
        exp: (now + ttl).as_secs(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

fn verify(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        }
    })?;

    Ok(data.claims)
}

/// Parses a lifetime string of the form `^\d+[dhms]$`.
///
/// Anything else returns [`FALLBACK_TTL`].
#[must_use]
pub fn parse_ttl(value: &str) -> Duration {
    let Some(unit) = value.chars().last() else {
        return FALLBACK_TTL;
    };

    let digits = &value[.. value.len() - unit.len_utf8()];
    let Ok(amount) = digits.parse::<u64>() else {
        return FALLBACK_TTL;
    };

    let seconds = match unit {
        'd' => amount.checked_mul(24 * 60 * 60),
        'h' => amount.checked_mul(60 * 60),
        'm' => amount.checked_mul(60),
        's' => Some(amount),
        _ => None,
    };

    match seconds {
        Some(seconds) => Duration::from_secs(seconds),
        None => FALLBACK_TTL,
    }
}

/// Deterministic one-way digest of a token, used as the refresh-token
/// store's lookup key. The token itself is high-entropy, so a fast keyed
/// digest suffices; this is indexing and at-rest protection, not
/// password-style brute-force resistance.
#[must_use]
pub fn hash_token(token: &str) -> String { blake3::hash(token.as_bytes()).to_hex().to_string() }

/// Extracts the Bearer token from an Authorization header value.
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if !auth_header.starts_with("Bearer ") {
        return None;
    }

    let token = auth_header.trim_start_matches("Bearer ").trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
