//! Password hashing and verification using Argon2id.
//!
//! Credential checks are deliberately slow; the Argon2 cost parameters are
//! the tunable, not a timeout concern. Verification never compares raw
//! strings and always uses constant-time equality.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::{rng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use base64::prelude::*;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,

    #[error("Base64 decoding failed: {0}")]
    DecodingFailed(#[from] base64::DecodeError),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Number of iterations
    pub time_cost:   u32,
    /// Number of lanes
    pub parallelism: u32,
    /// Length of the generated hash in bytes
    pub hash_length: u32,
    /// Length of the salt in bytes
    pub salt_length: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 15360, // 15 MiB
            time_cost:   3,
            parallelism: 2,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// The result uses the standard encoded form
/// `$argon2id$v=19$m=...,t=...,p=...$<salt_b64>$<hash_b64>` so parameters
/// travel with the hash.
pub fn hash_password(password: &SecretString, config: Option<PasswordConfig>) -> Result<SecretString, PasswordError> {
    let config = config.unwrap_or_default();

    let mut salt = vec![0u8; config.salt_length as usize];
    rng().fill_bytes(&mut salt);

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(config.hash_length as usize),
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut output = vec![0u8; config.hash_length as usize];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), &salt, &mut output)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    let encoded = format!(
        "$argon2id$v=19$m={},t={},p={}${}${}",
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        BASE64_STANDARD.encode(&salt),
        BASE64_STANDARD.encode(&output)
    );

    Ok(SecretString::from(encoded))
}

/// Verifies a password against a stored encoded hash.
///
/// Re-derives the hash with the parameters and salt embedded in
/// `expected_hash`, then compares in constant time.
pub fn verify_password(password: &SecretString, expected_hash: &str) -> Result<(), PasswordError> {
    // ["", "argon2id", "v=19", "m=...,t=...,p=...", "<salt>", "<hash>"]
    let parts: Vec<&str> = expected_hash.split('$').collect();
    if parts.len() != 6 || parts[1] != "argon2id" || parts[2] != "v=19" {
        return Err(PasswordError::InvalidHashFormat);
    }

    let (memory_cost, time_cost, parallelism) = parse_params(parts[3])?;

    let salt = BASE64_STANDARD.decode(parts[4])?;
    let stored_hash = BASE64_STANDARD.decode(parts[5])?;

    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(memory_cost, time_cost, parallelism, Some(stored_hash.len()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?,
    );

    let mut computed_hash = vec![0u8; stored_hash.len()];
    argon2
        .hash_password_into(
            password.expose_secret().as_bytes(),
            &salt,
            &mut computed_hash,
        )
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    use subtle::ConstantTimeEq;
    if computed_hash.as_slice().ct_eq(&stored_hash).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Parses the `m=...,t=...,p=...` parameter segment.
fn parse_params(params_str: &str) -> Result<(u32, u32, u32), PasswordError> {
    let mut memory_cost = None;
    let mut time_cost = None;
    let mut parallelism = None;

    for part in params_str.split(',') {
        if let Some(v) = part.strip_prefix("m=") {
            memory_cost = v.parse().ok();
        }
        else if let Some(v) = part.strip_prefix("t=") {
            time_cost = v.parse().ok();
        }
        else if let Some(v) = part.strip_prefix("p=") {
            parallelism = v.parse().ok();
        }
    }

    match (memory_cost, time_cost, parallelism) {
        (Some(m), Some(t), Some(p)) => Ok((m, t, p)),
        _ => Err(PasswordError::InvalidHashFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = SecretString::from("correct horse battery staple".to_string());
        let hash = hash_password(&password, None).unwrap();
        let result = verify_password(&password, hash.expose_secret());
        assert!(result.is_ok(), "Verification failed: {:?}", result);
    }

    #[test]
    fn test_wrong_password_fails() {
        let password = SecretString::from("CorrectPassword".to_string());
        let wrong_password = SecretString::from("WrongPassword".to_string());
        let hash = hash_password(&password, None).unwrap();
        assert!(verify_password(&wrong_password, hash.expose_secret()).is_err());
    }

    #[test]
    fn test_same_password_different_salt() {
        let password = SecretString::from("VelvetRope1!".to_string());
        let first = hash_password(&password, None).unwrap();
        let second = hash_password(&password, None).unwrap();
        assert_ne!(first.expose_secret(), second.expose_secret());
    }

    #[test]
    fn test_garbage_hash_rejected() {
        let password = SecretString::from("whatever".to_string());
        assert!(matches!(
            verify_password(&password, "not-an-encoded-hash"),
            Err(PasswordError::InvalidHashFormat)
        ));
        assert!(verify_password(&password, "$bcrypt$v=19$m=1,t=1,p=1$AA$AA").is_err());
    }
}
