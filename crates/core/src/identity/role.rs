//! The closed role set.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::IdentityError;

/// Identity role. Privileged operations are gated on `Admin` by a single
/// authorization check at the API boundary rather than ad-hoc per-route
/// comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordinary registered user.
    #[default]
    User,
    /// Administrator: reviews applications, verifies NINs, manages users
    /// and site content.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parses a role from a string.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::UnknownRole` for anything outside the
    /// closed set.
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }

    /// Returns true for administrator identities.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("user").unwrap(), Role::User);
        assert_eq!(Role::parse("ADMIN").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_rejects_unknown_roles() {
        assert!(matches!(
            Role::parse("superadmin"),
            Err(IdentityError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::default().is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(Role::parse(&Role::Admin.to_string()).unwrap(), Role::Admin);
    }
}
