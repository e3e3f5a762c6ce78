//! REST backend client.
//!
//! The site owns no data; everything lives behind an opaque HTTP JSON
//! backend. This module is the only place that talks to it. Two call
//! paths exist: public (no credentials) and authed, which attaches
//! `Authorization: Bearer <token>` and maps any 401/403 response to
//! [`BackendError::AuthRejected`] so callers can tear the session down.

pub mod appointments;
pub mod auth;
pub mod contact;
pub mod error;
pub mod homepage;
pub mod products;
pub mod types;
pub mod uploads;
pub mod users;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::SiteConfig;

pub use error::BackendError;

/// Backend REST client.
///
/// Cheaply cloneable via `Arc`; one instance lives in the app state.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens with a broken TLS environment. Called once at startup.
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(BackendClientInner {
                http,
                base: config.backend_url.clone(),
            }),
        }
    }

    /// Base URL of the backend (for display URL joining).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// URL prefix for images stored by the upload endpoint, with a
    /// trailing slash. Templates append the bare filename.
    #[must_use]
    pub fn image_base(&self) -> String {
        format!("{}/uploads/", self.inner.base.as_str().trim_end_matches('/'))
    }

    /// Absolute URL for an image filename stored by the upload endpoint.
    #[must_use]
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}/uploads/{}",
            self.inner.base.as_str().trim_end_matches('/'),
            filename.trim_start_matches('/')
        )
    }

    /// Build a request against a backend path.
    ///
    /// # Panics
    ///
    /// Never in practice: the base URL is validated at config load and
    /// paths are static strings.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.inner.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.inner.http.request(method, url)
    }

    /// GET a public resource.
    pub(crate) async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.request(Method::GET, path).send().await?;
        decode(response, false).await
    }

    /// POST a public JSON body.
    pub(crate) async fn post_public<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        decode(response, false).await
    }

    /// Send an authenticated request with an optional JSON body.
    pub(crate) async fn send_authed<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<T, BackendError> {
        let mut builder = self.request(method, path).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        decode(response, true).await
    }

    /// GET an authenticated resource.
    pub(crate) async fn get_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, BackendError> {
        self.send_authed::<(), T>(Method::GET, path, token, None)
            .await
    }

    /// DELETE an authenticated resource, ignoring the response body.
    pub(crate) async fn delete_authed(&self, path: &str, token: &str) -> Result<(), BackendError> {
        let response = self
            .request(Method::DELETE, path)
            .bearer_auth(token)
            .send()
            .await?;
        decode_empty(response, true).await
    }
}

/// Shape of backend error bodies: `{"message": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Turn a non-2xx response into a [`BackendError`].
///
/// On authed calls, 401 and 403 become `AuthRejected`; everywhere else the
/// body's `message` is preferred, falling back to a generic string.
async fn error_for(response: Response, authed: bool) -> BackendError {
    let status = response.status();

    if authed
        && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
    {
        return BackendError::AuthRejected {
            status: status.as_u16(),
        };
    }

    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| generic_message(status)),
        Err(_) => generic_message(status),
    };

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

fn generic_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}

async fn decode<T: DeserializeOwned>(response: Response, authed: bool) -> Result<T, BackendError> {
    if !response.status().is_success() {
        return Err(error_for(response, authed).await);
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn decode_empty(response: Response, authed: bool) -> Result<(), BackendError> {
    if !response.status().is_success() {
        return Err(error_for(response, authed).await);
    }
    Ok(())
}
