//! Home page and static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::backend::types::{HomepageContent, Product};
use crate::filters;
use crate::middleware::CurrentActor;
use crate::state::AppState;

use super::Nav;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub content: HomepageContent,
    pub featured: Vec<Product>,
    pub image_base: String,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub nav: Nav,
}

/// Access denied page template.
#[derive(Template, WebTemplate)]
#[template(path = "unauthorized.html")]
pub struct UnauthorizedTemplate {
    pub nav: Nav,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub nav: Nav,
}

/// Display the home page.
///
/// GET /
///
/// The hero section is backend-managed content. The page still renders
/// with placeholder content when the backend is unreachable so the
/// storefront never hard-fails on its landing page.
#[instrument(skip(state, actor))]
pub async fn home(State(state): State<AppState>, actor: CurrentActor) -> impl IntoResponse {
    let nav = Nav::from(&actor.0);

    let content = match state.backend().homepage_content().await {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to default homepage content");
            HomepageContent::default()
        }
    };

    let featured = match state.backend().list_products().await {
        Ok(mut products) => {
            products.truncate(4);
            products
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load featured products");
            Vec::new()
        }
    };

    HomeTemplate {
        nav,
        content,
        featured,
        image_base: state.backend().image_base(),
    }
}

/// Display the about page.
///
/// GET /about
#[instrument(skip(actor))]
pub async fn about(actor: CurrentActor) -> impl IntoResponse {
    AboutTemplate {
        nav: Nav::from(&actor.0),
    }
}

/// Display the access denied page.
///
/// GET /unauthorized
#[instrument(skip(actor))]
pub async fn unauthorized(actor: CurrentActor) -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        UnauthorizedTemplate {
            nav: Nav::from(&actor.0),
        },
    )
}

/// Fallback handler for unknown routes.
#[instrument(skip(actor))]
pub async fn not_found(actor: CurrentActor) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            nav: Nav::from(&actor.0),
        },
    )
}
