//! Admin contact message inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use unique_cctv_core::MessageId;

use crate::backend::types::ContactMessage;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// Message inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/messages.html")]
pub struct AdminMessagesTemplate {
    pub nav: Nav,
    pub messages: Vec<ContactMessage>,
    pub unread: u64,
}

/// Display the contact message inbox.
///
/// GET /admin/messages
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn index(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;

    let messages = match state.backend().list_contacts(&authed.token).await {
        Ok(messages) => messages,
        Err(err) if err.is_auth_rejected() => {
            return auth_rejected_response(&state, &session, "/admin/messages").await;
        }
        Err(err) => return AppError::from(err).into_response(),
    };

    let unread = match state.backend().unread_contact_count(&authed.token).await {
        Ok(count) => count.count,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load unread count");
            messages.iter().filter(|message| !message.read).count() as u64
        }
    };

    AdminMessagesTemplate {
        nav: super::nav_for(&authed),
        messages,
        unread,
    }
    .into_response()
}

/// Mark a message as read.
///
/// POST /admin/messages/{id}/read
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn mark_read(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    let authed = admin.0;
    let id = MessageId::from(id);

    match state.backend().mark_contact_read(&authed.token, &id).await {
        Ok(_) => Redirect::to("/admin/messages").into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/messages").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Delete a message.
///
/// POST /admin/messages/{id}/delete
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn delete(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    Path(id): Path<String>,
) -> Response {
    let authed = admin.0;
    let id = MessageId::from(id);

    match state.backend().delete_contact(&authed.token, &id).await {
        Ok(()) => {
            tracing::info!(message_id = %id, "contact message deleted");
            Redirect::to("/admin/messages").into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/messages").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
