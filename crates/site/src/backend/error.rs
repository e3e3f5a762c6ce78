//! Backend client error types.

use thiserror::Error;

/// Errors that can occur talking to the REST backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No response received (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend rejected the bearer token (401 or 403 on an
    /// authenticated call). Callers must tear the session down.
    #[error("authentication rejected ({status})")]
    AuthRejected {
        /// The rejecting status code (401 or 403).
        status: u16,
    },

    /// Non-2xx response carrying (or missing) a `message` body field.
    #[error("backend error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// Message suitable for inline display on a form.
    ///
    /// Backend-supplied messages are surfaced verbatim; transport and
    /// parse failures get a generic line instead of internals.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::AuthRejected { .. } => "Your session has expired. Please sign in again.".to_owned(),
            Self::Network(_) => "No response from server. Please check your connection.".to_owned(),
            Self::Parse(_) => "Unexpected response from server. Please try again.".to_owned(),
        }
    }

    /// Whether this error means the current session is no longer valid.
    #[must_use]
    pub const fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::AuthRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The backend message is shown verbatim on credential failures.
    #[test]
    fn test_api_message_surfaces_verbatim() {
        let err = BackendError::Api {
            status: 401,
            message: "Invalid credentials".to_owned(),
        };
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!err.is_auth_rejected());
    }

    #[test]
    fn test_auth_rejected_flags() {
        let err = BackendError::AuthRejected { status: 403 };
        assert!(err.is_auth_rejected());
        assert_eq!(err.to_string(), "authentication rejected (403)");
    }
}
