//! Contact form route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::types::ContactInput;
use crate::filters;
use crate::middleware::CurrentActor;
use crate::state::AppState;

use super::Nav;

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub success: bool,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}

/// Display the contact form.
///
/// GET /contact
///
/// Signed-in visitors get their name and email prefilled.
#[instrument(skip(actor))]
pub async fn form(actor: CurrentActor) -> impl IntoResponse {
    let current = actor.0;
    let (name, email) = current
        .current_user()
        .map(|user| (user.name.clone(), user.email.as_ref().to_string()))
        .unwrap_or_default();

    ContactTemplate {
        nav: Nav::from(&current),
        error: None,
        success: false,
        name,
        email,
        phone: String::new(),
        message: String::new(),
    }
}

/// Submit the contact form.
///
/// POST /contact
///
/// Contact submission is a public endpoint; no session is required.
/// The phone number is optional and forwarded only when given.
#[instrument(skip(state, actor, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    actor: CurrentActor,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    let nav = Nav::from(&actor.0);

    let name = form.name.trim().to_string();
    let email = form.email.trim().to_lowercase();
    let phone = form.phone.trim().to_string();
    let message = form.message.trim().to_string();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return ContactTemplate {
            nav,
            error: Some("Name, email, and message are required.".to_string()),
            success: false,
            name,
            email,
            phone,
            message,
        };
    }

    let input = ContactInput {
        name: name.clone(),
        email: email.clone(),
        phone: (!phone.is_empty()).then(|| phone.clone()),
        message: message.clone(),
    };

    match state.backend().submit_contact(&input).await {
        Ok(_) => {
            tracing::info!("contact message submitted");
            ContactTemplate {
                nav,
                error: None,
                success: true,
                name: String::new(),
                email: String::new(),
                phone: String::new(),
                message: String::new(),
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "contact submission failed");
            ContactTemplate {
                nav,
                error: Some(err.user_message()),
                success: false,
                name,
                email,
                phone,
                message,
            }
        }
    }
}
