//! Admin console route handlers.
//!
//! Every handler here takes the [`RequireAdmin`] extractor, so by the
//! time a handler body runs the visitor is known to hold an admin
//! session. Backend calls can still fail with an auth rejection when the
//! stored token has expired server-side; those funnel through the shared
//! teardown path.

pub mod appointments;
pub mod dashboard;
pub mod homepage;
pub mod messages;
pub mod products;
pub mod users;

use crate::middleware::auth::Authed;

use super::Nav;

fn nav_for(authed: &Authed) -> Nav {
    Nav {
        authenticated: true,
        admin: true,
        name: authed.profile.name.clone(),
    }
}
