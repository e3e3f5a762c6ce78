//! Session plumbing: the core auth state machine applied to cookie sessions.
//!
//! The browser-visible session cookie maps to a `tower_sessions::Session`
//! holding the two credential slots (`token`, `user_data`). Every helper
//! here funnels writes through the core pair functions so the both-or-
//! neither invariant holds no matter which call site mutates the session.

use axum::response::Redirect;
use tower_sessions::Session as CookieSession;

use unique_cctv_core::credential::MemoryCredentialStore;
use unique_cctv_core::{RoutePolicy, Session, UserProfile};

use crate::error::Result;

/// Session key for the bearer token slot.
const TOKEN_KEY: &str = unique_cctv_core::credential::TOKEN_KEY;

/// Session key for the serialized profile slot.
const USER_DATA_KEY: &str = unique_cctv_core::credential::USER_DATA_KEY;

/// Restore the auth session for this request.
///
/// Loads the credential pair out of the cookie session, runs the core
/// restore (which self-heals partial or malformed pairs), and writes any
/// healing back. Always returns a `Ready` session; a failure to even read
/// the session store degrades to logged-out rather than erroring the page.
pub async fn current_session(session: &CookieSession) -> Session {
    let (restored, _token) = restore_with_token(session).await;
    restored
}

/// Restore the auth session and hand back the bearer token alongside it.
///
/// The guard extractors use this to avoid restoring twice per request.
/// Like [`current_session`], any healing of a partial or malformed pair
/// is written back so the corruption does not outlive this request.
pub async fn restore_with_token(session: &CookieSession) -> (Session, Option<String>) {
    let mut store = snapshot(session).await;
    let had_any_slot = store.token.is_some() || store.user_data.is_some();
    let restored = Session::restore(&mut store);

    // restore() only ever mutates the store to clear corruption
    if had_any_slot && store.token.is_none() && store.user_data.is_none() && !restored.is_authenticated() {
        tracing::debug!("healed corrupt persisted credential");
        remove_pair(session).await;
    }

    let token = restored.is_authenticated().then(|| store.token).flatten();
    (restored, token)
}

/// Establish a session after a successful login or registration.
///
/// # Errors
///
/// Returns an error if the session store rejects the write; the pair is
/// rolled back so a half-written credential never persists.
pub async fn establish(
    session: &CookieSession,
    token: &str,
    profile: &UserProfile,
) -> Result<Session> {
    let mut store = MemoryCredentialStore::default();
    let mut auth = Session::restore(&mut store);
    auth.establish(&mut store, token, profile.clone());

    let (Some(token), Some(user_data)) = (store.token, store.user_data) else {
        // establish() always fills both slots
        return Ok(auth);
    };

    if let Err(err) = write_pair(session, token, user_data).await {
        remove_pair(session).await;
        return Err(err);
    }

    Ok(auth)
}

/// Tear the session down: clear the actor and the persisted pair.
///
/// Pure client-side teardown; the backend is never contacted.
pub async fn clear(session: &CookieSession) {
    remove_pair(session).await;
    if let Err(err) = session.flush().await {
        tracing::error!(error = %err, "Failed to flush session");
    }
}

/// Handle an authentication-rejected backend response observed outside the
/// login/register flow.
///
/// Tears the session down, then decides whether to bounce: on public
/// routes the redirect is suppressed (the page did not need auth, so a
/// bounce to login would only confuse); everywhere else the user is sent
/// to login with the current path preserved for the post-login return.
pub async fn recover_auth_rejection(
    session: &CookieSession,
    current_path: &str,
    policy: RoutePolicy,
) -> Option<Redirect> {
    tracing::debug!(path = current_path, "session invalidated by backend");
    clear(session).await;

    if policy.is_public(current_path) {
        None
    } else {
        Some(Redirect::to(&format!(
            "/login?return_to={}",
            urlencoding::encode(current_path)
        )))
    }
}

/// Snapshot the two credential slots into an in-memory store.
async fn snapshot(session: &CookieSession) -> MemoryCredentialStore {
    MemoryCredentialStore {
        token: session.get::<String>(TOKEN_KEY).await.ok().flatten(),
        user_data: session.get::<String>(USER_DATA_KEY).await.ok().flatten(),
    }
}

/// Write both slots; error on the second write triggers rollback upstream.
async fn write_pair(session: &CookieSession, token: String, user_data: String) -> Result<()> {
    session.insert(TOKEN_KEY, token).await?;
    session.insert(USER_DATA_KEY, user_data).await?;
    Ok(())
}

/// Remove both slots, always both.
async fn remove_pair(session: &CookieSession) {
    if let Err(err) = session.remove::<String>(TOKEN_KEY).await {
        tracing::error!(error = %err, "Failed to clear token slot");
    }
    if let Err(err) = session.remove::<String>(USER_DATA_KEY).await {
        tracing::error!(error = %err, "Failed to clear user_data slot");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;
    use tower_sessions::MemoryStore;

    use unique_cctv_core::types::{Email, Role, UserId};

    use super::*;

    fn fresh_session() -> CookieSession {
        CookieSession::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new("u-1"),
            name: "Asha Rao".to_owned(),
            email: Email::parse("asha@example.com").expect("valid email"),
            role: Role::User,
            mobile: None,
        }
    }

    // A lone token slot is corruption; the restore must clear it from
    // the cookie session itself, not just the in-memory snapshot.
    #[tokio::test]
    async fn test_restore_with_token_heals_partial_pair_in_session() {
        let session = fresh_session();
        session
            .insert(TOKEN_KEY, "orphan-token".to_owned())
            .await
            .expect("insert");

        let (restored, token) = restore_with_token(&session).await;

        assert!(!restored.is_authenticated());
        assert_eq!(token, None);
        assert_eq!(session.get::<String>(TOKEN_KEY).await.expect("read"), None);
    }

    #[tokio::test]
    async fn test_restore_with_token_round_trips_established_pair() {
        let session = fresh_session();
        establish(&session, "tok-1", &profile()).await.expect("establish");

        let (restored, token) = restore_with_token(&session).await;

        assert!(restored.is_authenticated());
        assert_eq!(token.as_deref(), Some("tok-1"));
        assert_eq!(restored.current_user().map(|u| u.name.as_str()), Some("Asha Rao"));
    }

    #[tokio::test]
    async fn test_auth_rejection_tears_down_and_redirects_with_return_to() {
        let session = fresh_session();
        establish(&session, "tok-1", &profile()).await.expect("establish");

        let redirect = recover_auth_rejection(&session, "/profile", RoutePolicy)
            .await
            .expect("protected path redirects to login");

        let response = redirect.into_response();
        let location = response.headers().get(LOCATION).expect("location header");
        assert_eq!(location, "/login?return_to=%2Fprofile");
        assert_eq!(session.get::<String>(TOKEN_KEY).await.expect("read"), None);
        assert_eq!(session.get::<String>(USER_DATA_KEY).await.expect("read"), None);
    }

    #[tokio::test]
    async fn test_auth_rejection_on_public_path_suppresses_redirect() {
        let session = fresh_session();
        establish(&session, "tok-1", &profile()).await.expect("establish");

        let redirect = recover_auth_rejection(&session, "/products", RoutePolicy).await;

        assert!(redirect.is_none());
        assert_eq!(session.get::<String>(TOKEN_KEY).await.expect("read"), None);
    }
}
