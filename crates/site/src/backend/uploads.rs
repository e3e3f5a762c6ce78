//! Image upload endpoint (admin).
//!
//! The contract is deliberately narrow: given a file, the backend returns
//! a stored filename. Display URLs are joined with
//! [`BackendClient::image_url`].

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};

use super::types::UploadedImage;
use super::{BackendClient, BackendError};

impl BackendClient {
    /// Upload a product or hero image.
    ///
    /// # Errors
    ///
    /// 401/403 map to [`BackendError::AuthRejected`] like every other
    /// authed call; multipart requests bypass the JSON default header but
    /// keep the bearer token.
    pub async fn upload_image(
        &self,
        token: &str,
        file_name: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, BackendError> {
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = Form::new().part("image", part);

        let response = self
            .request(Method::POST, "/upload/image")
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::AuthRejected {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: format!("Upload failed with status {}", status.as_u16()),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
