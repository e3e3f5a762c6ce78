//! Admin appointment management.

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

use unique_cctv_core::AppointmentId;

use crate::backend::types::{Appointment, AppointmentStatus};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// Appointment management template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/appointments.html")]
pub struct AdminAppointmentsTemplate {
    pub nav: Nav,
    pub appointments: Vec<Appointment>,
    pub statuses: &'static [AppointmentStatus],
}

/// The status values offered in the transition dropdown.
pub const STATUSES: &[AppointmentStatus] = &[
    AppointmentStatus::Pending,
    AppointmentStatus::Confirmed,
    AppointmentStatus::Completed,
    AppointmentStatus::Cancelled,
];

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: AppointmentStatus,
}

/// Display all appointments.
///
/// GET /admin/appointments
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn index(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;
    match state.backend().list_appointments(&authed.token).await {
        Ok(appointments) => AdminAppointmentsTemplate {
            nav: super::nav_for(&authed),
            appointments,
            statuses: STATUSES,
        }
        .into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/appointments").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Change an appointment's status.
///
/// POST /admin/appointments/{id}/status
#[instrument(skip(state, session, admin, form), fields(user_id = %admin.0.profile.id))]
pub async fn update_status(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let authed = admin.0;
    let id = AppointmentId::from(id);

    match state
        .backend()
        .update_appointment_status(&authed.token, &id, form.status)
        .await
    {
        Ok(_) => {
            tracing::info!(appointment_id = %id, status = form.status.as_str(), "appointment status changed");
            Redirect::to("/admin/appointments").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/appointments").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
