//! Account profile route handlers.
//!
//! Profile edits go through the backend, which returns the updated
//! profile; the session's stored copy is then replaced wholesale so the
//! persisted token and profile never drift apart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use unique_cctv_core::UserProfile;

use crate::backend::types::{PasswordChange, ProfileUpdate};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::services::auth as auth_service;
use crate::state::AppState;

use super::Nav;

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub nav: Nav,
    pub profile: UserProfile,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Profile update form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

fn nav_for(profile: &UserProfile) -> Nav {
    Nav {
        authenticated: true,
        admin: profile.is_admin(),
        name: profile.name.clone(),
    }
}

fn render(profile: UserProfile, error: Option<String>, notice: Option<String>) -> Response {
    ProfileTemplate {
        nav: nav_for(&profile),
        profile,
        error,
        notice,
    }
    .into_response()
}

/// Display the profile page.
///
/// GET /profile
#[instrument(skip(auth))]
pub async fn show(auth: RequireAuth) -> impl IntoResponse {
    render(auth.0.profile, None, None)
}

/// Update the current user's profile.
///
/// POST /profile
#[instrument(skip(state, session, auth, form), fields(user_id = %auth.0.profile.id))]
pub async fn update(
    State(state): State<AppState>,
    session: CookieSession,
    auth: RequireAuth,
    Form(form): Form<ProfileForm>,
) -> Response {
    let authed = auth.0;
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return render(authed.profile, Some("Name is required.".to_string()), None);
    }

    let update = ProfileUpdate {
        name,
        mobile: form
            .mobile
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string),
    };

    match state.backend().update_profile(&authed.token, &update).await {
        Ok(updated) => {
            if let Err(err) = auth_service::establish(&session, &authed.token, &updated).await {
                tracing::error!(error = %err, "failed to refresh stored profile");
                return render(
                    updated,
                    Some("Profile saved, but your session could not be refreshed.".to_string()),
                    None,
                );
            }
            tracing::info!("profile updated");
            render(updated, None, Some("Profile updated.".to_string()))
        }
        Err(err) if err.is_auth_rejected() => {
            tracing::warn!("token rejected while updating profile");
            super::auth_rejected_response(&state, &session, "/profile").await
        }
        Err(err) => {
            tracing::error!(error = %err, "profile update failed");
            render(authed.profile, Some(err.user_message()), None)
        }
    }
}

/// Change the current user's password.
///
/// POST /profile/password
#[instrument(skip(state, session, auth, form), fields(user_id = %auth.0.profile.id))]
pub async fn change_password(
    State(state): State<AppState>,
    session: CookieSession,
    auth: RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Response {
    let authed = auth.0;

    if form.new_password.len() < 6 {
        return render(
            authed.profile,
            Some("New password must be at least 6 characters.".to_string()),
            None,
        );
    }
    if form.new_password != form.confirm_password {
        return render(
            authed.profile,
            Some("New passwords do not match.".to_string()),
            None,
        );
    }

    let change = PasswordChange {
        current_password: form.current_password,
        new_password: form.new_password,
    };

    match state.backend().change_password(&authed.token, &change).await {
        Ok(()) => {
            tracing::info!("password changed");
            render(authed.profile, None, Some("Password changed.".to_string()))
        }
        Err(err) if err.is_auth_rejected() => {
            tracing::warn!("token rejected while changing password");
            super::auth_rejected_response(&state, &session, "/profile").await
        }
        Err(err) => {
            tracing::error!(error = %err, "password change failed");
            render(authed.profile, Some(err.user_message()), None)
        }
    }
}
