//! Auth endpoints: credential exchange and registration.
//!
//! These are the only calls that return a bearer token. They run on the
//! public path: a 401 here is a bad credential, not a stale session, so
//! it surfaces as an inline message instead of tearing anything down.

use serde::Serialize;

use super::types::{AuthResponse, RegisterInput};
use super::{BackendClient, BackendError};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl BackendClient {
    /// Exchange credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Api`] with the backend's `message` for bad
    /// credentials, or [`BackendError::Network`] when no response arrives.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        self.post_public("/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Register a new account. The response is an implicit login.
    ///
    /// # Errors
    ///
    /// Same contract as [`BackendClient::login`].
    pub async fn register(&self, input: &RegisterInput) -> Result<AuthResponse, BackendError> {
        self.post_public("/auth/register", input).await
    }
}
