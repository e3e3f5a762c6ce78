//! Contact message endpoints.
//!
//! Submission is a public intake form; the inbox is admin-only.

use reqwest::Method;

use unique_cctv_core::MessageId;

use super::types::{ContactInput, ContactMessage, UnreadCount};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// Submit the public contact form.
    pub async fn submit_contact(&self, input: &ContactInput) -> Result<ContactMessage, BackendError> {
        self.post_public("/contact", input).await
    }

    /// List all received messages (admin).
    pub async fn list_contacts(&self, token: &str) -> Result<Vec<ContactMessage>, BackendError> {
        self.get_authed("/contact", token).await
    }

    /// Count of unread messages, for the inbox badge (admin).
    pub async fn unread_contact_count(&self, token: &str) -> Result<UnreadCount, BackendError> {
        self.get_authed("/contact/unread/count", token).await
    }

    /// Mark a message as read (admin).
    pub async fn mark_contact_read(
        &self,
        token: &str,
        id: &MessageId,
    ) -> Result<ContactMessage, BackendError> {
        self.send_authed::<(), _>(Method::PUT, &format!("/contact/{id}/read"), token, None)
            .await
    }

    /// Delete a message (admin).
    pub async fn delete_contact(&self, token: &str, id: &MessageId) -> Result<(), BackendError> {
        self.delete_authed(&format!("/contact/{id}"), token).await
    }
}
