//! Login, registration and logout route handlers.
//!
//! A successful login or registration stores the backend token and
//! profile on the cookie session in one step, then redirects by role:
//! admins land on the admin dashboard, regular users on their profile.
//! A `return_to` query parameter captured by the route guard takes
//! precedence unless it points back at the login page itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use unique_cctv_core::post_login_destination;

use crate::backend::types::RegisterInput;
use crate::filters;
use crate::services::auth as auth_service;
use crate::state::AppState;

use super::Nav;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub email: String,
    pub return_to: Option<String>,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub mobile: String,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize, Default)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub mobile: Option<String>,
}

/// Display the login page.
///
/// GET /login
///
/// Already-authenticated visitors are sent straight to their landing
/// page instead of seeing the form again.
#[instrument(skip(session))]
pub async fn login_page(
    session: CookieSession,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    let current = auth_service::current_session(&session).await;
    if current.is_authenticated() {
        let destination = post_login_destination(query.return_to.as_deref(), current.role());
        return Redirect::to(&destination).into_response();
    }

    LoginTemplate {
        nav: Nav::anonymous(),
        error: None,
        email: String::new(),
        return_to: query.return_to,
    }
    .into_response()
}

/// Authenticate against the backend and establish the session.
///
/// POST /login
///
/// On failure the form is re-rendered with the backend's error message
/// inline and no session state is touched.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: CookieSession,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let email = form.email.trim().to_lowercase();

    match state.backend().login(&email, &form.password).await {
        Ok(auth) => {
            if let Err(err) = auth_service::establish(&session, &auth.token, &auth.user).await {
                tracing::error!(error = %err, "failed to persist session after login");
                return render_login_error(
                    &email,
                    form.return_to,
                    "Something went wrong. Please try again.",
                );
            }
            tracing::info!(user_id = %auth.user.id, role = auth.user.role.as_str(), "user logged in");
            let destination =
                post_login_destination(form.return_to.as_deref(), Some(auth.user.role));
            Redirect::to(&destination).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "login rejected");
            render_login_error(&email, form.return_to, &err.user_message())
        }
    }
}

fn render_login_error(
    email: &str,
    return_to: Option<String>,
    message: &str,
) -> axum::response::Response {
    LoginTemplate {
        nav: Nav::anonymous(),
        error: Some(message.to_string()),
        email: email.to_string(),
        return_to,
    }
    .into_response()
}

/// Display the registration page.
///
/// GET /register
#[instrument(skip(session))]
pub async fn register_page(session: CookieSession) -> impl IntoResponse {
    let current = auth_service::current_session(&session).await;
    if current.is_authenticated() {
        let destination = post_login_destination(None, current.role());
        return Redirect::to(&destination).into_response();
    }

    RegisterTemplate {
        nav: Nav::anonymous(),
        error: None,
        name: String::new(),
        email: String::new(),
        mobile: String::new(),
    }
    .into_response()
}

/// Create an account and log the new user in.
///
/// POST /register
///
/// Registration is an implicit login: the backend returns the same
/// token-plus-profile payload as the login endpoint and the session is
/// established from it directly.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: CookieSession,
    Form(form): Form<RegisterForm>,
) -> impl IntoResponse {
    let name = form.name.trim().to_string();
    let email = form.email.trim().to_lowercase();
    let mobile = form
        .mobile
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    if let Some(message) = validate_registration(&name, &form.password, &form.confirm_password) {
        return render_register_error(&name, &email, mobile.as_deref(), message);
    }

    let input = RegisterInput {
        name: name.clone(),
        email: email.clone(),
        password: form.password,
        mobile: mobile.clone(),
    };

    match state.backend().register(&input).await {
        Ok(auth) => {
            if let Err(err) = auth_service::establish(&session, &auth.token, &auth.user).await {
                tracing::error!(error = %err, "failed to persist session after registration");
                return render_register_error(
                    &name,
                    &email,
                    mobile.as_deref(),
                    "Something went wrong. Please try again.",
                );
            }
            tracing::info!(user_id = %auth.user.id, "user registered");
            let destination = post_login_destination(None, Some(auth.user.role));
            Redirect::to(&destination).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration rejected");
            render_register_error(&name, &email, mobile.as_deref(), &err.user_message())
        }
    }
}

fn validate_registration(name: &str, password: &str, confirm: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("Name is required.");
    }
    if password.len() < 6 {
        return Some("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Some("Passwords do not match.");
    }
    None
}

fn render_register_error(
    name: &str,
    email: &str,
    mobile: Option<&str>,
    message: &str,
) -> axum::response::Response {
    RegisterTemplate {
        nav: Nav::anonymous(),
        error: Some(message.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        mobile: mobile.unwrap_or_default().to_string(),
    }
    .into_response()
}

/// End the session and return to the home page.
///
/// POST /logout
///
/// Logging out is purely local: the cookie session is cleared without
/// calling the backend, so a stale token on the backend side simply
/// expires on its own.
#[instrument(skip(session))]
pub async fn logout(session: CookieSession) -> impl IntoResponse {
    auth_service::clear(&session).await;
    Redirect::to("/")
}
