//! Appointment booking route handlers.
//!
//! The booking form is a public page, but submitting it requires a
//! logged-in user; the guard bounces anonymous submitters to login and
//! brings them back here afterwards.

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

use crate::backend::types::AppointmentInput;
use crate::filters;
use crate::middleware::{CurrentActor, RequireAuth};
use crate::state::AppState;

use super::Nav;

/// Services offered on the booking form.
pub const SERVICES: &[&str] = &[
    "CCTV Installation",
    "CCTV Repair",
    "Annual Maintenance",
    "Site Survey",
];

/// Appointment booking page template.
#[derive(Template, WebTemplate)]
#[template(path = "appointment.html")]
pub struct AppointmentTemplate {
    pub nav: Nav,
    pub services: &'static [&'static str],
    pub error: Option<String>,
    pub success: bool,
    pub name: String,
    pub email: String,
}

/// Appointment booking form data.
#[derive(Debug, Deserialize)]
pub struct AppointmentForm {
    pub name: String,
    pub email: String,
    pub mob_no: String,
    pub address: String,
    pub selected_service: String,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Display the appointment booking form.
///
/// GET /book-appointment
///
/// Signed-in visitors get their contact details prefilled.
#[instrument(skip(actor))]
pub async fn form(actor: CurrentActor) -> impl IntoResponse {
    let current = actor.0;
    let (name, email) = current
        .current_user()
        .map(|user| (user.name.clone(), user.email.as_ref().to_string()))
        .unwrap_or_default();

    AppointmentTemplate {
        nav: Nav::from(&current),
        services: SERVICES,
        error: None,
        success: false,
        name,
        email,
    }
}

/// Book an appointment.
///
/// POST /book-appointment
///
/// Requires a logged-in user. If the backend rejects the stored token
/// the session is torn down and the visitor is sent back through login.
#[instrument(skip(state, session, auth, form), fields(user_id = %auth.0.profile.id))]
pub async fn book(
    State(state): State<AppState>,
    session: CookieSession,
    auth: RequireAuth,
    Form(form): Form<AppointmentForm>,
) -> Response {
    let authed = auth.0;
    let nav = Nav {
        authenticated: true,
        admin: authed.profile.is_admin(),
        name: authed.profile.name.clone(),
    };

    let input = AppointmentInput {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_lowercase(),
        mob_no: form.mob_no.trim().to_string(),
        address: form.address.trim().to_string(),
        selected_service: form.selected_service,
        appointment_date: form.appointment_date,
        appointment_time: form.appointment_time,
        description: form
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string),
    };

    if input.name.is_empty()
        || input.email.is_empty()
        || input.mob_no.is_empty()
        || input.address.is_empty()
        || input.appointment_date.is_empty()
        || input.appointment_time.is_empty()
    {
        return AppointmentTemplate {
            nav,
            services: SERVICES,
            error: Some("Please fill in all required fields.".to_string()),
            success: false,
            name: input.name,
            email: input.email,
        }
        .into_response();
    }

    match state.backend().book_appointment(&authed.token, &input).await {
        Ok(appointment) => {
            tracing::info!(appointment_id = %appointment.id, "appointment booked");
            AppointmentTemplate {
                nav,
                services: SERVICES,
                error: None,
                success: true,
                name: authed.profile.name.clone(),
                email: authed.profile.email.as_ref().to_string(),
            }
            .into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            tracing::warn!("token rejected while booking appointment");
            super::auth_rejected_response(&state, &session, "/book-appointment").await
        }
        Err(err) => {
            tracing::error!(error = %err, "appointment booking failed");
            AppointmentTemplate {
                nav,
                services: SERVICES,
                error: Some(err.user_message()),
                success: false,
                name: input.name,
                email: input.email,
            }
            .into_response()
        }
    }
}
