//! User role enum.

use serde::{Deserialize, Serialize};

/// Authorization role assigned by the backend.
///
/// This is a closed enumeration: the wire format is the exact strings
/// `"USER"` and `"ADMIN"`, and anything else fails deserialization. The
/// restore boundary uses [`Role::parse`] instead, which normalizes
/// whitespace and case before matching and returns `None` for unknown
/// values rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Leniently parse a role string.
    ///
    /// Trims and uppercases before matching; unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// The wire representation of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role carries admin privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Admin).expect("serialize"), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"USER\"").expect("deserialize");
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_unknown_role_fails_deserialization() {
        assert!(serde_json::from_str::<Role>("\"SUPERUSER\"").is_err());
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(Role::parse(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse(""), None);
    }
}
