//! # Route Policy Enforcement
//!
//! Bridges policy decisions from the auth crate onto HTTP error responses.

use auth::{AccessDecision, CallerIdentity, ResourcePolicy};
use error::{AppError, Result};

/// Checks a caller against a route's resource policy.
///
/// Returns `Ok(())` when access is allowed, otherwise the error that should
/// terminate the request: 401 for callers who never authenticated, 403 for
/// authenticated callers the policy turns away.
pub fn enforce(caller: &CallerIdentity, policy: &ResourcePolicy) -> Result<()> {
    match auth::evaluate(caller, policy) {
        AccessDecision::Allowed => Ok(()),
        AccessDecision::Unauthorized => Err(AppError::unauthorized("請先登入")),
        AccessDecision::Forbidden(reason) => Err(AppError::forbidden(reason.message())),
    }
}
