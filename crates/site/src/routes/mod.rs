//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (backend-managed content)
//! GET  /health                  - Health check
//! GET  /about                   - About page
//!
//! # Catalog (public)
//! GET  /products                - Product listing (?category=, ?q=)
//! GET  /products/{id}           - Product detail
//!
//! # Intake forms
//! GET  /contact                 - Contact form
//! POST /contact                 - Submit contact form (public)
//! GET  /book-appointment        - Appointment form
//! POST /book-appointment        - Book appointment (requires login)
//!
//! # Auth
//! GET  /login                   - Login page (?return_to=)
//! POST /login                   - Login action
//! GET  /register                - Register page
//! POST /register                - Register action (implicit login)
//! POST /logout                  - Logout action
//! GET  /unauthorized            - Access denied page
//!
//! # Account (requires auth)
//! GET  /profile                 - Profile overview + edit form
//! POST /profile                 - Update profile
//! POST /profile/password        - Change password
//!
//! # Admin console (requires admin)
//! GET  /admin                   - Dashboard
//! GET  /admin/products          - Product management
//! GET  /admin/products/new      - New product form
//! POST /admin/products          - Create product
//! GET  /admin/products/{id}/edit - Edit product form
//! POST /admin/products/{id}     - Update product
//! POST /admin/products/{id}/delete - Delete product
//! GET  /admin/users             - User management
//! POST /admin/users/{id}/role   - Change user role
//! POST /admin/users/{id}/delete - Delete user
//! GET  /admin/homepage          - Homepage content editor
//! POST /admin/homepage          - Update homepage content
//! GET  /admin/appointments      - Appointment list
//! POST /admin/appointments/{id}/status - Update appointment status
//! GET  /admin/messages          - Contact message inbox
//! POST /admin/messages/{id}/read    - Mark message read
//! POST /admin/messages/{id}/delete  - Delete message
//! ```

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod contact;
pub mod pages;
pub mod products;
pub mod profile;

use axum::response::{IntoResponse, Redirect, Response};
use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session as CookieSession;

use unique_cctv_core::Session;

use crate::middleware::auth_rate_limiter;
use crate::services::auth as auth_service;
use crate::state::AppState;

/// Header state shared by every page template.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub authenticated: bool,
    pub admin: bool,
    pub name: String,
}

impl Nav {
    /// Nav for a page rendered with no session (login, register).
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl From<&Session> for Nav {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            admin: session.is_admin(),
            name: session
                .current_user()
                .map(|user| user.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Respond to an authentication-rejected backend call.
///
/// Tears the session down; on non-public paths the response is a bounce
/// to login carrying the path, on public paths a reload of the same page,
/// now signed out.
pub(crate) async fn auth_rejected_response(
    state: &AppState,
    session: &CookieSession,
    current_path: &str,
) -> Response {
    match auth_service::recover_auth_rejection(session, current_path, state.policy()).await {
        Some(redirect) => redirect.into_response(),
        None => Redirect::to(current_path).into_response(),
    }
}

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the account routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).post(profile::update))
        .route("/password", post(profile::change_password))
}

/// Create the admin console router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard::show))
        .route(
            "/products",
            get(admin::products::index).post(admin::products::create),
        )
        .route("/products/new", get(admin::products::new_form))
        .route("/products/{id}", post(admin::products::update))
        .route("/products/{id}/edit", get(admin::products::edit_form))
        .route("/products/{id}/delete", post(admin::products::delete))
        .route("/users", get(admin::users::index))
        .route("/users/{id}/role", post(admin::users::update_role))
        .route("/users/{id}/delete", post(admin::users::delete))
        .route(
            "/homepage",
            get(admin::homepage::editor).post(admin::homepage::update),
        )
        .route("/appointments", get(admin::appointments::index))
        .route(
            "/appointments/{id}/status",
            post(admin::appointments::update_status),
        )
        .route("/messages", get(admin::messages::index))
        .route("/messages/{id}/read", post(admin::messages::mark_read))
        .route("/messages/{id}/delete", post(admin::messages::delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/unauthorized", get(pages::unauthorized))
        .nest("/products", product_routes())
        .route(
            "/contact",
            get(contact::form).post(contact::submit),
        )
        .route(
            "/book-appointment",
            get(appointments::form).post(appointments::book),
        )
        .nest("/profile", profile_routes())
        .nest("/admin", admin_routes())
        .merge(auth_routes())
        .fallback(pages::not_found)
}
