//! Admin user management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use unique_cctv_core::{Role, UserId};

use crate::backend::types::UserSummary;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// User management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub nav: Nav,
    pub users: Vec<UserSummary>,
    pub current_admin_id: String,
}

/// Role change form data.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

/// Display the user list.
///
/// GET /admin/users
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn index(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;
    match state.backend().list_users(&authed.token).await {
        Ok(users) => AdminUsersTemplate {
            nav: super::nav_for(&authed),
            users,
            current_admin_id: authed.profile.id.as_str().to_string(),
        }
        .into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/users").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Change a user's role.
///
/// POST /admin/users/{id}/role
///
/// Unknown role values are rejected before any backend call; the role
/// set is closed.
#[instrument(skip(state, session, admin, form), fields(user_id = %admin.0.profile.id))]
pub async fn update_role(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Response {
    let authed = admin.0;
    let id = UserId::from(id);

    let Some(role) = Role::parse(&form.role) else {
        tracing::warn!(requested = %form.role, "rejected unknown role value");
        return AppError::BadRequest(format!("unknown role: {}", form.role)).into_response();
    };

    match state.backend().update_user_role(&authed.token, &id, role).await {
        Ok(_) => {
            tracing::info!(target_user = %id, role = role.as_str(), "user role changed");
            Redirect::to("/admin/users").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/users").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Delete a user account.
///
/// POST /admin/users/{id}/delete
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn delete(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    let authed = admin.0;
    let id = UserId::from(id);

    // Self-deletion would orphan the very session performing it.
    if id == authed.profile.id {
        return AppError::BadRequest("cannot delete your own account".to_owned()).into_response();
    }

    match state.backend().delete_user(&authed.token, &id).await {
        Ok(()) => {
            tracing::info!(target_user = %id, "user deleted");
            Redirect::to("/admin/users").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/users").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
