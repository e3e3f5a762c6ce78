//! User profile value object.

use serde::{Deserialize, Serialize};

use super::{Email, Role, UserId};

/// The identity of a logged-in user, as returned by the backend's login
/// and register endpoints.
///
/// Treated as an opaque value object: the client never validates or
/// mutates individual fields, only replaces the whole profile when the
/// backend hands out a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend-assigned user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// Authorization role.
    pub role: Role,
    /// Optional contact number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl UserProfile {
    /// Whether this profile carries admin privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
impl UserProfile {
    /// Build a fixed profile for tests elsewhere in the crate.
    pub(crate) fn test_with_role(role: Role) -> Self {
        Self {
            id: UserId::new("u-1"),
            name: "Asha Rao".to_owned(),
            email: Email::parse("asha@example.com").expect("valid email"),
            role,
            mobile: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> UserProfile {
        UserProfile::test_with_role(role)
    }

    #[test]
    fn test_round_trip_preserves_profile() {
        let p = profile(Role::Admin);
        let json = serde_json::to_string(&p).expect("serialize");
        let back: UserProfile = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }

    #[test]
    fn test_mobile_defaults_to_none() {
        let json = r#"{"id":"u-2","name":"J","email":"j@x.com","role":"USER"}"#;
        let p: UserProfile = serde_json::from_str(json).expect("deserialize");
        assert_eq!(p.mobile, None);
        assert!(!p.is_admin());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"id":"u-3","name":"J","email":"j@x.com","role":"OWNER"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }
}
