//! Route guard decisions.
//!
//! A guard wraps a protected view with a declared [`Requirement`] and, on
//! every navigation, collapses the session state into a [`Decision`].
//! Decisions are terminal per navigation and recomputed from scratch on
//! the next one; nothing here is cached.

use crate::session::{Session, SessionStatus};

/// Declared access requirement for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirement {
    /// The view needs a logged-in user.
    pub require_auth: bool,
    /// The view needs an admin. Implies `require_auth`.
    pub require_admin: bool,
}

impl Requirement {
    /// No requirement; the guard always grants.
    #[must_use]
    pub const fn public() -> Self {
        Self {
            require_auth: false,
            require_admin: false,
        }
    }

    /// Requires any logged-in user.
    #[must_use]
    pub const fn auth() -> Self {
        Self {
            require_auth: true,
            require_admin: false,
        }
    }

    /// Requires an admin.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            require_auth: true,
            require_admin: true,
        }
    }

    /// Combine two requirements into one that enforces both.
    ///
    /// Lets a caller layer a declared floor on top of the route table's
    /// requirement for the path; the stricter constraint wins per field.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self {
            require_auth: self.require_auth || other.require_auth,
            require_admin: self.require_admin || other.require_admin,
        }
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Session restore has not completed; render nothing yet. Avoids a
    /// flash of "access denied" before the first restore finishes.
    Defer,
    /// Render the wrapped view unmodified.
    Grant,
    /// Send to the login view, carrying the intended destination so login
    /// can return the user there.
    ToLogin {
        return_to: String,
    },
    /// Send to the unauthorized view.
    ToUnauthorized,
}

/// Evaluate a requirement against the current session.
///
/// Checks run in a fixed order: initialization defers everything; the
/// admin check precedes and supersedes the auth check, so an
/// authenticated non-admin hitting an admin view is rejected as
/// forbidden, not bounced to login.
#[must_use]
pub fn evaluate(session: &Session, requirement: Requirement, current_path: &str) -> Decision {
    if session.status() == SessionStatus::Initializing {
        return Decision::Defer;
    }

    if requirement.require_admin && !session.is_admin() {
        return Decision::ToUnauthorized;
    }

    if (requirement.require_auth || requirement.require_admin) && !session.is_authenticated() {
        return Decision::ToLogin {
            return_to: current_path.to_owned(),
        };
    }

    Decision::Grant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, UserProfile};

    fn ready(role: Option<Role>) -> Session {
        Session::ready(role.map(UserProfile::test_with_role))
    }

    // While initializing, every requirement defers, regardless of
    // what the session happens to contain.
    #[test]
    fn test_initializing_defers_all_requirements() {
        let session = Session::new();
        for requirement in [Requirement::public(), Requirement::auth(), Requirement::admin()] {
            assert_eq!(evaluate(&session, requirement, "/profile"), Decision::Defer);
        }
    }

    #[test]
    fn test_public_always_grants_when_ready() {
        assert_eq!(
            evaluate(&ready(None), Requirement::public(), "/products"),
            Decision::Grant
        );
        assert_eq!(
            evaluate(&ready(Some(Role::User)), Requirement::public(), "/"),
            Decision::Grant
        );
    }

    #[test]
    fn test_auth_required_redirects_anonymous_to_login() {
        assert_eq!(
            evaluate(&ready(None), Requirement::auth(), "/profile"),
            Decision::ToLogin {
                return_to: "/profile".to_owned()
            }
        );
    }

    #[test]
    fn test_auth_required_grants_any_logged_in_role() {
        assert_eq!(
            evaluate(&ready(Some(Role::User)), Requirement::auth(), "/profile"),
            Decision::Grant
        );
        assert_eq!(
            evaluate(&ready(Some(Role::Admin)), Requirement::auth(), "/profile"),
            Decision::Grant
        );
    }

    // Admin supersedes auth; an authenticated USER is
    // forbidden, not bounced to login.
    #[test]
    fn test_admin_supersedes_auth_for_logged_in_user() {
        assert_eq!(
            evaluate(&ready(Some(Role::User)), Requirement::admin(), "/admin"),
            Decision::ToUnauthorized
        );
    }

    #[test]
    fn test_admin_requirement_rejects_anonymous_as_unauthorized() {
        // Anonymous is also not admin, so the admin check fires first.
        assert_eq!(
            evaluate(&ready(None), Requirement::admin(), "/admin"),
            Decision::ToUnauthorized
        );
    }

    #[test]
    fn test_admin_granted() {
        assert_eq!(
            evaluate(&ready(Some(Role::Admin)), Requirement::admin(), "/admin"),
            Decision::Grant
        );
    }

    #[test]
    fn test_and_enforces_the_stricter_constraint() {
        assert_eq!(Requirement::public().and(Requirement::admin()), Requirement::admin());
        assert_eq!(Requirement::auth().and(Requirement::public()), Requirement::auth());
        assert_eq!(Requirement::public().and(Requirement::public()), Requirement::public());
    }

    // The login redirect preserves the requested path.
    #[test]
    fn test_login_redirect_carries_requested_path() {
        let decision = evaluate(&ready(None), Requirement::auth(), "/profile");
        assert_eq!(
            decision,
            Decision::ToLogin {
                return_to: "/profile".to_owned()
            }
        );
    }
}
