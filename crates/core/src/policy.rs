//! The route table and redirect policy.
//!
//! One authoritative list of which paths are public, which need a login,
//! and which need an admin. Both the guard wiring and the 401 recovery
//! rule consult this table, so the two can never silently diverge.

use crate::guard::Requirement;
use crate::types::Role;

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/about",
    "/login",
    "/register",
    "/products",
    "/contact",
    "/book-appointment",
    "/unauthorized",
];

/// Prefix under which every path needs an admin.
const ADMIN_PREFIX: &str = "/admin";

/// Paths that need any logged-in user.
const AUTH_PATHS: &[&str] = &["/profile"];

/// The site's route authorization table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePolicy;

impl RoutePolicy {
    /// Whether a path is public.
    ///
    /// Public paths never trigger the post-401 login redirect; bouncing a
    /// visitor off a page that did not need auth in the first place is
    /// just confusing. Sub-paths of `/products` (detail pages) are public
    /// like their listing.
    #[must_use]
    pub fn is_public(self, path: &str) -> bool {
        let path = normalize(path);
        PUBLIC_PATHS.contains(&path) || path.starts_with("/products/")
    }

    /// The guard requirement for a path.
    #[must_use]
    pub fn requirement_for(self, path: &str) -> Requirement {
        let path = normalize(path);
        if path == ADMIN_PREFIX || path.starts_with("/admin/") {
            Requirement::admin()
        } else if AUTH_PATHS.contains(&path) || path.starts_with("/profile/") {
            Requirement::auth()
        } else {
            Requirement::public()
        }
    }
}

/// Strip a trailing slash (except for the root) and any query string.
fn normalize(path: &str) -> &str {
    let path = path.split('?').next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// Compute where a successful login should land.
///
/// A `return_to` captured by the guard wins, unless it is trivial (`/` or
/// `/login`, i.e. the user was not actually bounced from anywhere worth
/// returning to). Otherwise the role decides: admins go to the dashboard,
/// users to their profile, and a missing role falls back to home.
#[must_use]
pub fn post_login_destination(return_to: Option<&str>, role: Option<Role>) -> String {
    if let Some(path) = return_to {
        let path = normalize(path);
        if path != "/" && path != "/login" {
            return path.to_owned();
        }
    }

    match role {
        Some(Role::Admin) => "/admin".to_owned(),
        Some(Role::User) => "/profile".to_owned(),
        None => "/".to_owned(),
    }
}
