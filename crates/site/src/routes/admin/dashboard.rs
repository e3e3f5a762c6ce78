//! Admin dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use crate::backend::types::UserStats;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Nav,
    pub stats: UserStats,
    pub unread_messages: u64,
}

/// Display the admin dashboard.
///
/// GET /admin
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn show(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;

    let stats = match state.backend().user_stats(&authed.token).await {
        Ok(stats) => stats,
        Err(err) if err.is_auth_rejected() => {
            return auth_rejected_response(&state, &session, "/admin").await;
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load dashboard stats");
            UserStats::default()
        }
    };

    let unread_messages = match state.backend().unread_contact_count(&authed.token).await {
        Ok(count) => count.count,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load unread message count");
            0
        }
    };

    DashboardTemplate {
        nav: super::nav_for(&authed),
        stats,
        unread_messages,
    }
    .into_response()
}
