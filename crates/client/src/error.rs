//! Error types for the SecOps client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during SecOps client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Caller-supplied data failed a local precondition. Raised before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API answered with a failure status.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A success response could not be decoded.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Authentication is misconfigured.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The configured access token has expired and must be replaced.
    #[error("Access token expired, please supply a fresh token")]
    SessionExpired,

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limiting persisted through every retry.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),
}

impl ClientError {
    /// Check if this is an API error whose message signals missing permissions.
    ///
    /// This is a case-insensitive substring match on the message text, not a
    /// structured status code check.
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::ApiError { message, .. } if message.to_lowercase().contains("permission")
        )
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthFailed(_) | Self::SessionExpired)
    }

    /// Check if an HTTP status code is retried by the transport.
    ///
    /// Only 429 (Too Many Requests) is retried; every other status is handed
    /// back to the caller unchanged.
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429
    }

    /// Prefix the message of an [`ClientError::ApiError`] with extra context.
    ///
    /// Other variants are returned unchanged.
    pub(crate) fn with_api_context(self, context: impl FnOnce(&str) -> String) -> Self {
        match self {
            Self::ApiError {
                status,
                url,
                message,
            } => Self::ApiError {
                status,
                url,
                message: context(&message),
            },
            other => other,
        }
    }
}
