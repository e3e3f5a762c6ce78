//! Homepage content endpoints.

use reqwest::Method;

use super::types::HomepageContent;
use super::{BackendClient, BackendError};

impl BackendClient {
    /// Fetch the editable homepage content (public).
    pub async fn homepage_content(&self) -> Result<HomepageContent, BackendError> {
        self.get_public("/homepage").await
    }

    /// Replace the homepage content (admin).
    pub async fn update_homepage_content(
        &self,
        token: &str,
        content: &HomepageContent,
    ) -> Result<HomepageContent, BackendError> {
        self.send_authed(Method::PUT, "/homepage", token, Some(content))
            .await
    }
}
