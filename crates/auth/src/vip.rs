//! # VIP Tier Model
//!
//! Six ordinal membership tiers. A higher level grants access to everything
//! a lower level can see.

use serde::{Deserialize, Serialize};

/// A membership tier, ordinal in `[1, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VipLevel(u8);

impl VipLevel {
    pub const FREE: Self = Self(1);
    pub const BRONZE: Self = Self(2);
    pub const SILVER: Self = Self(3);
    pub const GOLD: Self = Self(4);
    pub const PLATINUM: Self = Self(5);
    pub const DIAMOND: Self = Self(6);

    /// Creates a level, rejecting values outside `[1, 6]`.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        if (1 ..= 6).contains(&value) {
            Some(Self(value))
        }
        else {
            None
        }
    }

    /// Creates a level from a stored integer, clamping out-of-range values
    /// into `[1, 6]`. The database constrains the column, so clamping only
    /// matters for hand-edited rows.
    #[must_use]
    pub fn from_stored(value: i32) -> Self { Self(value.clamp(1, 6) as u8) }

    /// Numeric rank of this tier.
    #[must_use]
    pub fn rank(self) -> u8 { self.0 }

    /// Human-readable tier name shown in denial messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "免費會員",
            2 => "銅牌會員",
            3 => "銀牌會員",
            4 => "金牌會員",
            5 => "白金會員",
            _ => "鑽石會員",
        }
    }

    /// Whether this tier satisfies a resource's required tier.
    #[must_use]
    pub fn satisfies(self, required: VipLevel) -> bool { self >= required }
}

impl std::fmt::Display for VipLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.label()) }
}

impl TryFrom<i32> for VipLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| format!("VIP level must be between 1 and 6, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bounds() {
        assert!(VipLevel::new(0).is_none());
        assert_eq!(VipLevel::new(1), Some(VipLevel::FREE));
        assert_eq!(VipLevel::new(6), Some(VipLevel::DIAMOND));
        assert!(VipLevel::new(7).is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(VipLevel::DIAMOND > VipLevel::PLATINUM);
        assert!(VipLevel::FREE < VipLevel::BRONZE);
        assert!(VipLevel::SILVER.satisfies(VipLevel::SILVER));
        assert!(VipLevel::SILVER.satisfies(VipLevel::FREE));
        assert!(!VipLevel::SILVER.satisfies(VipLevel::GOLD));
    }

    #[test]
    fn test_labels() {
        assert_eq!(VipLevel::FREE.label(), "免費會員");
        assert_eq!(VipLevel::PLATINUM.label(), "白金會員");
        assert_eq!(VipLevel::DIAMOND.label(), "鑽石會員");
    }

    #[test]
    fn test_from_stored_clamps() {
        assert_eq!(VipLevel::from_stored(-3), VipLevel::FREE);
        assert_eq!(VipLevel::from_stored(4), VipLevel::GOLD);
        assert_eq!(VipLevel::from_stored(99), VipLevel::DIAMOND);
    }

    #[test]
    fn test_try_from_i32() {
        assert_eq!(VipLevel::try_from(5), Ok(VipLevel::PLATINUM));
        assert!(VipLevel::try_from(0).is_err());
        assert!(VipLevel::try_from(42).is_err());
    }
}
