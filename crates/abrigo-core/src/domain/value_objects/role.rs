//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User roles with hierarchical permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user managing their own account and pets.
    #[default]
    User,
    /// Shelter administrator with full access.
    Admin,
}

impl UserRole {
    /// Returns the role's permission level (higher = more permissions).
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::User => 1,
            Self::Admin => 2,
        }
    }

    /// Checks if this role has at least the permissions of the required role.
    #[must_use]
    pub const fn has_permission(&self, required: Self) -> bool {
        self.level() >= required.level()
    }

    /// Parses a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" | "administrator" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_levels() {
        assert!(UserRole::Admin.level() > UserRole::User.level());
    }

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.has_permission(UserRole::User));
        assert!(UserRole::Admin.has_permission(UserRole::Admin));
        assert!(!UserRole::User.has_permission(UserRole::Admin));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("wizard"), None);
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }
}
