//! Wire types for the REST backend.
//!
//! The backend speaks camelCase JSON; everything here is a direct mapping
//! of its request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use unique_cctv_core::{AppointmentId, MessageId, Price, ProductId, Role, UserId, UserProfile};

/// Response body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token.
    pub token: String,
    /// The profile the token was issued for.
    pub user: UserProfile,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    /// Stored image filename; joined with the backend base URL for display.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i32>,
}

/// Create/update payload for a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
}

/// Editable homepage content.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HomepageContent {
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub hero_button_text: String,
    #[serde(default)]
    pub hero_image: Option<String>,
}

/// Contact form submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

/// A received contact message (admin inbox).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Unread-count response for the admin inbox badge.
#[derive(Debug, Clone, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

/// Appointment booking payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub name: String,
    pub email: String,
    pub mob_no: String,
    pub address: String,
    pub selected_service: String,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A booked appointment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub name: String,
    pub email: String,
    pub mob_no: String,
    pub address: String,
    pub selected_service: String,
    pub appointment_date: String,
    pub appointment_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Appointment scheduling status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// The wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// A managed user row (admin user management).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_appointments: u64,
    #[serde(default)]
    pub pending_appointments: u64,
    #[serde(default)]
    pub total_contacts: u64,
    #[serde(default)]
    pub unread_contacts: u64,
}

/// Profile update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

/// Password change payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

/// Response of the image upload endpoint: the stored filename.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format_is_camel_case() {
        let json = r#"{
            "id": "p1",
            "name": "Dome Camera",
            "description": "1080p indoor dome",
            "price": "2499.00",
            "category": "dome",
            "stockQuantity": 12
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.stock_quantity, Some(12));
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_appointment_status_defaults_to_pending() {
        let json = r#"{
            "id": "a1",
            "name": "N",
            "email": "n@x.com",
            "mobNo": "555",
            "address": "12 Lane",
            "selectedService": "installation",
            "appointmentDate": "2026-09-01",
            "appointmentTime": "10:00"
        }"#;
        let appt: Appointment = serde_json::from_str(json).expect("deserialize");
        assert_eq!(appt.status, AppointmentStatus::Pending);
    }
}
