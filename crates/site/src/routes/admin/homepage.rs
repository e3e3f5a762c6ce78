//! Admin homepage content editor.
//!
//! The editor is a multipart form: hero text fields plus an optional
//! replacement hero image. Like the product form, a new image is
//! uploaded first and its stored filename written into the content
//! payload.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session as CookieSession;
use tracing::instrument;

use crate::backend::types::HomepageContent;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::{Nav, auth_rejected_response};
use crate::state::AppState;

/// Homepage editor template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/homepage.html")]
pub struct HomepageEditorTemplate {
    pub nav: Nav,
    pub content: HomepageContent,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub image_base: String,
}

/// Fields parsed out of the multipart editor form.
#[derive(Debug, Default)]
struct EditorFormData {
    hero_title: String,
    hero_subtitle: String,
    hero_button_text: String,
    hero_image: Option<(String, String, Vec<u8>)>,
}

async fn read_form(mut multipart: Multipart) -> Result<EditorFormData, AppError> {
    let mut data = EditorFormData::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "hero_image" => {
                let file_name = field.file_name().map(ToString::to_string);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);
                let bytes = field.bytes().await.map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?;
                if let Some(file_name) = file_name.filter(|f| !f.is_empty())
                    && !bytes.is_empty()
                {
                    data.hero_image = Some((file_name, content_type, bytes.to_vec()));
                }
            }
            other => {
                let value = field.text().await.map_err(|_| AppError::BadRequest("invalid form data".to_owned()))?;
                match other {
                    "hero_title" => data.hero_title = value,
                    "hero_subtitle" => data.hero_subtitle = value,
                    "hero_button_text" => data.hero_button_text = value,
                    _ => {}
                }
            }
        }
    }

    Ok(data)
}

/// Display the homepage content editor.
///
/// GET /admin/homepage
#[instrument(skip(state, session, admin), fields(user_id = %admin.0.profile.id))]
pub async fn editor(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
) -> Response {
    let authed = admin.0;
    match state.backend().homepage_content().await {
        Ok(content) => HomepageEditorTemplate {
            nav: super::nav_for(&authed),
            content,
            error: None,
            notice: None,
            image_base: state.backend().image_base(),
        }
        .into_response(),
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/homepage").await
        }
        Err(err) => AppError::from(err).into_response(),
    }
}

/// Update the homepage content.
///
/// POST /admin/homepage
#[instrument(skip(state, session, admin, multipart), fields(user_id = %admin.0.profile.id))]
pub async fn update(
    State(state): State<AppState>,
    session: CookieSession,
    admin: RequireAdmin,
    multipart: Multipart,
) -> Response {
    let authed = admin.0;

    let data = match read_form(multipart).await {
        Ok(data) => data,
        Err(err) => return err.into_response(),
    };

    let existing = state
        .backend()
        .homepage_content()
        .await
        .unwrap_or_default();

    let hero_image = match data.hero_image.clone() {
        Some((file_name, content_type, bytes)) => {
            match state
                .backend()
                .upload_image(&authed.token, file_name, &content_type, bytes)
                .await
            {
                Ok(uploaded) => Some(uploaded.filename),
                Err(err) if err.is_auth_rejected() => {
                    return auth_rejected_response(&state, &session, "/admin/homepage").await;
                }
                Err(err) => {
                    return render_error(&state, &authed, existing, err.user_message());
                }
            }
        }
        None => existing.hero_image.clone(),
    };

    let content = HomepageContent {
        hero_title: data.hero_title.trim().to_string(),
        hero_subtitle: data.hero_subtitle.trim().to_string(),
        hero_button_text: data.hero_button_text.trim().to_string(),
        hero_image,
    };

    match state
        .backend()
        .update_homepage_content(&authed.token, &content)
        .await
    {
        Ok(updated) => {
            tracing::info!("homepage content updated");
            HomepageEditorTemplate {
                nav: super::nav_for(&authed),
                content: updated,
                error: None,
                notice: Some("Homepage updated.".to_string()),
                image_base: state.backend().image_base(),
            }
            .into_response()
        }
        Err(err) if err.is_auth_rejected() => {
            auth_rejected_response(&state, &session, "/admin/homepage").await
        }
        Err(err) => render_error(&state, &authed, content, err.user_message()),
    }
}

fn render_error(
    state: &AppState,
    authed: &crate::middleware::auth::Authed,
    content: HomepageContent,
    message: String,
) -> Response {
    HomepageEditorTemplate {
        nav: super::nav_for(authed),
        content,
        error: Some(message),
        notice: None,
        image_base: state.backend().image_base(),
    }
    .into_response()
}
