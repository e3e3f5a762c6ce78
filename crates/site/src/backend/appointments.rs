//! Appointment endpoints.
//!
//! Booking requires a logged-in user; the full list and status changes
//! are admin operations.

use reqwest::Method;
use serde::Serialize;

use unique_cctv_core::AppointmentId;

use super::types::{Appointment, AppointmentInput, AppointmentStatus};
use super::{BackendClient, BackendError};

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: AppointmentStatus,
}

impl BackendClient {
    /// Book an appointment for the current user.
    pub async fn book_appointment(
        &self,
        token: &str,
        input: &AppointmentInput,
    ) -> Result<Appointment, BackendError> {
        self.send_authed(Method::POST, "/appointments", token, Some(input))
            .await
    }

    /// List all appointments (admin).
    pub async fn list_appointments(&self, token: &str) -> Result<Vec<Appointment>, BackendError> {
        self.get_authed("/appointments", token).await
    }

    /// Change an appointment's scheduling status (admin).
    pub async fn update_appointment_status(
        &self,
        token: &str,
        id: &AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment, BackendError> {
        self.send_authed(
            Method::PATCH,
            &format!("/appointments/{id}/status"),
            token,
            Some(&StatusUpdate { status }),
        )
        .await
    }
}
