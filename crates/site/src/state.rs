//! Application state shared across handlers.

use std::sync::Arc;

use unique_cctv_core::RoutePolicy;

use crate::backend::BackendClient;
use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to configuration, the
/// backend client, and the route authorization table.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    backend: BackendClient,
    policy: RoutePolicy,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let backend = BackendClient::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                policy: RoutePolicy,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the backend REST client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get the route authorization table.
    #[must_use]
    pub fn policy(&self) -> RoutePolicy {
        self.inner.policy
    }
}
