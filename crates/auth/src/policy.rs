//! # Authorization Policy
//!
//! Pure decision functions consulted by every protected entry point. The
//! caller's identity and the resource's policy descriptor arrive as explicit
//! parameters; nothing here reads request context or global state.

use uuid::Uuid;

use crate::{tokens::Claims, vip::VipLevel};

/// Who is making the request.
///
/// Threaded explicitly through handlers instead of being smuggled through
/// mutable per-request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// No valid bearer token was presented.
    Anonymous,
    /// A verified access token identified this caller.
    Identified {
        id:        Uuid,
        username:  String,
        vip_level: VipLevel,
        is_admin:  bool,
    },
}

impl CallerIdentity {
    /// Builds an identity from verified access-token claims.
    #[must_use]
    pub fn from_claims(claims: &Claims) -> Self {
        Self::Identified {
            id:        claims.sub,
            username:  claims.username.clone(),
            vip_level: claims.vip_level,
            is_admin:  claims.is_admin,
        }
    }

    /// The caller's tier, if identified.
    #[must_use]
    pub fn vip_level(&self) -> Option<VipLevel> {
        match self {
            Self::Anonymous => None,
            Self::Identified {
                vip_level, ..
            } => Some(*vip_level),
        }
    }

    /// Whether the caller carries the admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Identified {
                is_admin: true,
                ..
            }
        )
    }
}

/// Per-resource access requirements, attached to each endpoint at
/// registration time and read by one enforcement layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePolicy {
    /// Minimum tier an identified caller must hold.
    pub required_vip_level: VipLevel,
    /// Restricts the resource to admin callers.
    pub admin_only: bool,
    /// Public resources accept anonymous callers.
    pub public: bool,
}

impl ResourcePolicy {
    /// Open to everyone, including anonymous callers.
    pub const PUBLIC: Self = Self {
        required_vip_level: VipLevel::FREE,
        admin_only:         false,
        public:             true,
    };

    /// Admin-only resource.
    pub const ADMIN: Self = Self {
        required_vip_level: VipLevel::FREE,
        admin_only:         true,
        public:             false,
    };

    /// Members-only resource gated at the given tier.
    #[must_use]
    pub const fn members_at(required_vip_level: VipLevel) -> Self {
        Self {
            required_vip_level,
            admin_only: false,
            public: false,
        }
    }
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The resource is restricted to admins.
    AdminOnly,
    /// The caller's tier is below the resource's requirement.
    TierTooLow {
        required: VipLevel,
    },
}

impl DenialReason {
    /// Denial message shown to the caller, naming the required tier.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AdminOnly => "此功能僅限管理員使用".to_string(),
            Self::TierTooLow {
                required,
            } => format!("此功能需要 {} 等級以上才能使用", required.label()),
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller may access the resource.
    Allowed,
    /// No identity was presented for a non-public resource.
    Unauthorized,
    /// An identity was presented but does not qualify.
    Forbidden(DenialReason),
}

/// Outcome of a playback check for time-bounded media.
///
/// A tier shortfall on video is a soft denial: the request still succeeds,
/// but the response is degraded to the configured preview duration. This is
/// a third policy outcome, distinct from a hard `Forbidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackDecision {
    /// Full duration, `can_watch = true`.
    Full,
    /// Preview duration only, `can_watch = false`.
    PreviewOnly,
}

/// Evaluates a caller against a resource policy.
#[must_use]
pub fn evaluate(caller: &CallerIdentity, policy: &ResourcePolicy) -> AccessDecision {
    let CallerIdentity::Identified {
        vip_level,
        is_admin,
        ..
    } = caller
    else {
        return if policy.public && !policy.admin_only {
            AccessDecision::Allowed
        }
        else {
            AccessDecision::Unauthorized
        };
    };

    if policy.admin_only && !is_admin {
        return AccessDecision::Forbidden(DenialReason::AdminOnly);
    }

    if !vip_level.satisfies(policy.required_vip_level) {
        return AccessDecision::Forbidden(DenialReason::TierTooLow {
            required: policy.required_vip_level,
        });
    }

    AccessDecision::Allowed
}

/// Evaluates whether a caller may watch a video in full.
///
/// Anonymous callers and callers below the required tier get the preview
/// entitlement rather than a denial.
#[must_use]
pub fn evaluate_playback(caller: &CallerIdentity, required: VipLevel) -> PlaybackDecision {
    match caller.vip_level() {
        Some(level) if level.satisfies(required) => PlaybackDecision::Full,
        _ => PlaybackDecision::PreviewOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(vip_level: VipLevel) -> CallerIdentity {
        CallerIdentity::Identified {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            vip_level,
            is_admin: false,
        }
    }

    fn admin() -> CallerIdentity {
        CallerIdentity::Identified {
            id:        Uuid::new_v4(),
            username:  "root".to_string(),
            vip_level: VipLevel::FREE,
            is_admin:  true,
        }
    }

    #[test]
    fn test_anonymous_on_public_resource() {
        assert_eq!(
            evaluate(&CallerIdentity::Anonymous, &ResourcePolicy::PUBLIC),
            AccessDecision::Allowed
        );
    }

    #[test]
    fn test_anonymous_on_members_resource() {
        let policy = ResourcePolicy::members_at(VipLevel::FREE);
        assert_eq!(
            evaluate(&CallerIdentity::Anonymous, &policy),
            AccessDecision::Unauthorized
        );
    }

    #[test]
    fn test_tier_boundary_values() {
        let policy = ResourcePolicy::members_at(VipLevel::PLATINUM);

        // Exactly at the required tier passes.
        assert_eq!(
            evaluate(&member(VipLevel::PLATINUM), &policy),
            AccessDecision::Allowed
        );

        // One below is denied, naming the required tier.
        assert_eq!(
            evaluate(&member(VipLevel::GOLD), &policy),
            AccessDecision::Forbidden(DenialReason::TierTooLow {
                required: VipLevel::PLATINUM,
            })
        );
    }

    #[test]
    fn test_denial_message_names_required_tier() {
        let reason = DenialReason::TierTooLow {
            required: VipLevel::PLATINUM,
        };
        assert_eq!(reason.message(), "此功能需要 白金會員 等級以上才能使用");
    }

    #[test]
    fn test_admin_gate_ignores_vip_level() {
        // Even a Diamond member is denied if not an admin.
        assert_eq!(
            evaluate(&member(VipLevel::DIAMOND), &ResourcePolicy::ADMIN),
            AccessDecision::Forbidden(DenialReason::AdminOnly)
        );
        assert_eq!(
            evaluate(&admin(), &ResourcePolicy::ADMIN),
            AccessDecision::Allowed
        );
    }

    #[test]
    fn test_anonymous_on_admin_resource() {
        assert_eq!(
            evaluate(&CallerIdentity::Anonymous, &ResourcePolicy::ADMIN),
            AccessDecision::Unauthorized
        );
    }

    #[test]
    fn test_playback_is_soft_denied() {
        let alice = member(VipLevel::SILVER);

        assert_eq!(
            evaluate_playback(&alice, VipLevel::FREE),
            PlaybackDecision::Full
        );
        assert_eq!(
            evaluate_playback(&alice, VipLevel::SILVER),
            PlaybackDecision::Full
        );
        assert_eq!(
            evaluate_playback(&alice, VipLevel::PLATINUM),
            PlaybackDecision::PreviewOnly
        );
        assert_eq!(
            evaluate_playback(&CallerIdentity::Anonymous, VipLevel::FREE),
            PlaybackDecision::PreviewOnly
        );
    }

    #[test]
    fn test_identity_from_claims() {
        let claims = crate::tokens::Claims {
            sub:       Uuid::new_v4(),
            username:  "alice".to_string(),
            vip_level: VipLevel::SILVER,
            is_admin:  false,
            jti:       Uuid::new_v4(),
            iat:       0,
            exp:       0,
        };

        let caller = CallerIdentity::from_claims(&claims);
        assert_eq!(caller.vip_level(), Some(VipLevel::SILVER));
        assert!(!caller.is_admin());
    }
}
