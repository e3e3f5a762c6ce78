//! Authentication middleware and extractors.
//!
//! Provides extractors that run the core route guard for handlers: one
//! infallible (current actor, whoever that is) and two requiring — any
//! logged-in user, or an admin. Rejections render the guard decision as
//! HTTP redirects.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session as CookieSession;

use unique_cctv_core::guard::{self, Decision, Requirement};
use unique_cctv_core::{RoutePolicy, Session, UserProfile};

use crate::services::auth as auth_service;

/// A verified actor: the profile plus the bearer token for backend calls.
#[derive(Debug, Clone)]
pub struct Authed {
    pub profile: UserProfile,
    pub token: String,
}

/// Extractor for the current auth session, whatever it holds.
///
/// Never rejects; public pages use it to vary the header between
/// "Sign in" and the account menu.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentActor(session): CurrentActor) -> impl IntoResponse {
///     match session.current_user() {
///         Some(user) => format!("Hello, {}!", user.name),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct CurrentActor(pub Session);

/// Extractor that requires any logged-in user.
///
/// If nobody is logged in, redirects to the login page with the current
/// path preserved as `return_to`.
pub struct RequireAuth(pub Authed);

/// Extractor that requires an admin.
///
/// A logged-in non-admin is sent to `/unauthorized`; the admin check
/// supersedes the login check, so nobody is bounced to login just to be
/// told "forbidden" afterwards.
pub struct RequireAdmin(pub Authed);

/// Error returned when a guard requirement is not met.
pub enum GuardRejection {
    /// Session restore has not completed; ask the client to retry.
    Defer,
    /// Redirect to the login page, preserving the intended destination.
    ToLogin { return_to: String },
    /// Redirect to the unauthorized page.
    ToUnauthorized,
    /// The session layer is missing entirely (misconfigured router).
    NoSession,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Defer => (
                StatusCode::SERVICE_UNAVAILABLE,
                [(header::RETRY_AFTER, "1")],
            )
                .into_response(),
            Self::ToLogin { return_to } => Redirect::to(&format!(
                "/login?return_to={}",
                urlencoding::encode(&return_to)
            ))
            .into_response(),
            Self::ToUnauthorized => Redirect::to("/unauthorized").into_response(),
            Self::NoSession => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Run the guard for a requirement, handing back the actor and token on
/// success.
///
/// The declared requirement is a floor; the route table's requirement
/// for the path is layered on top, so a handler mounted under `/admin`
/// is admin-gated even if its extractor only asked for a login.
async fn evaluate(
    parts: &mut Parts,
    floor: Requirement,
) -> Result<(Session, Option<String>), GuardRejection> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts
        .extensions
        .get::<CookieSession>()
        .ok_or(GuardRejection::NoSession)?;

    let (auth, token) = auth_service::restore_with_token(session).await;
    let requirement = floor.and(RoutePolicy.requirement_for(parts.uri.path()));

    match guard::evaluate(&auth, requirement, parts.uri.path()) {
        Decision::Grant => Ok((auth, token)),
        Decision::Defer => Err(GuardRejection::Defer),
        Decision::ToLogin { return_to } => Err(GuardRejection::ToLogin { return_to }),
        Decision::ToUnauthorized => Err(GuardRejection::ToUnauthorized),
    }
}

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (auth, _token) = evaluate(parts, Requirement::public()).await?;
        Ok(Self(auth))
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (auth, token) = evaluate(parts, Requirement::auth()).await?;
        into_authed(auth, token).map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let (auth, token) = evaluate(parts, Requirement::admin()).await?;
        into_authed(auth, token).map(Self)
    }
}

/// A granted auth/admin requirement implies both parts are present.
fn into_authed(auth: Session, token: Option<String>) -> Result<Authed, GuardRejection> {
    match (auth.current_user().cloned(), token) {
        (Some(profile), Some(token)) => Ok(Authed { profile, token }),
        _ => Err(GuardRejection::NoSession),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use tower_sessions::MemoryStore;

    use unique_cctv_core::types::{Email, Role, UserId};

    use super::*;

    fn parts_for(path: &str) -> Parts {
        let (mut parts, ()) = Request::builder()
            .uri(path)
            .body(())
            .expect("request")
            .into_parts();
        parts
            .extensions
            .insert(CookieSession::new(None, Arc::new(MemoryStore::default()), None));
        parts
    }

    async fn log_in(parts: &Parts, role: Role) {
        let profile = UserProfile {
            id: UserId::new("u-1"),
            name: "Asha Rao".to_owned(),
            email: Email::parse("asha@example.com").expect("valid email"),
            role,
            mobile: None,
        };
        let session = parts.extensions.get::<CookieSession>().expect("session layer");
        auth_service::establish(session, "tok-1", &profile)
            .await
            .expect("establish");
    }

    #[tokio::test]
    async fn test_current_actor_never_rejects_anonymous_on_public_path() {
        let mut parts = parts_for("/products");
        let actor = CurrentActor::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| "rejected")
            .expect("public path grants");
        assert!(actor.0.current_user().is_none());
    }

    #[tokio::test]
    async fn test_require_auth_redirects_anonymous_with_return_to() {
        let mut parts = parts_for("/profile");
        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("anonymous is rejected");
        assert!(matches!(
            rejection,
            GuardRejection::ToLogin { ref return_to } if return_to == "/profile"
        ));
    }

    // The route table escalates anything under /admin to the admin
    // requirement, even when the extractor only declared a login floor.
    #[tokio::test]
    async fn test_route_table_escalates_admin_prefix() {
        let mut parts = parts_for("/admin/products");
        log_in(&parts, Role::User).await;
        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("non-admin is rejected");
        assert!(matches!(rejection, GuardRejection::ToUnauthorized));
    }

    #[tokio::test]
    async fn test_require_admin_grants_admin_with_token() {
        let mut parts = parts_for("/admin");
        log_in(&parts, Role::Admin).await;
        let RequireAdmin(authed) = RequireAdmin::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| "rejected")
            .expect("admin grants");
        assert_eq!(authed.token, "tok-1");
        assert!(authed.profile.is_admin());
    }
}
