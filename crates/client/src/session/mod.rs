//! Authenticated HTTP session used by every API call.
//!
//! # What this module handles:
//! - The [`Session`] capability the client core is written against
//! - [`AuthorizedSession`], the reqwest-backed implementation that attaches
//!   the bearer token, records metrics and backs off on HTTP 429
//!
//! # What this module does NOT handle:
//! - Interpreting status codes. Every response, successful or not, is handed
//!   back as a [`SessionResponse`]; each endpoint decides what counts as success.
//! - Minting OAuth tokens (see [`crate::auth`])
//!
//! # Invariants
//! - Only 429 responses are retried, and only inside [`AuthorizedSession`]
//! - Transport failures surface as [`ClientError::HttpError`]

mod retry;

use std::future::Future;

use reqwest::{Client, RequestBuilder};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::SessionManager;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

pub use retry::send_with_retry;

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    /// HTTP status code.
    pub status: u16,
    /// Final request URL.
    pub url: String,
    /// Raw response body.
    pub body: String,
}

impl SessionResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// The raw response body.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResponse`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to parse response from {} (HTTP {}): {e}",
                self.url, self.status
            ))
        })
    }

    /// Build an [`ClientError::ApiError`] whose message is `context` followed
    /// by the raw body.
    pub fn api_error(&self, context: &str) -> ClientError {
        ClientError::ApiError {
            status: self.status,
            url: self.url.clone(),
            message: format!("{context}: {}", self.body),
        }
    }
}

/// Authenticated request/response capability.
///
/// The client issues strictly sequential calls through this trait; it never
/// retries, times out or cancels a request itself.
pub trait Session: Send + Sync {
    /// Send a GET request with the given query parameters.
    fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<SessionResponse>> + Send;

    /// Send a POST request with a JSON body.
    fn post<B>(&self, url: &str, body: &B) -> impl Future<Output = Result<SessionResponse>> + Send
    where
        B: Serialize + Sync + ?Sized;
}

/// reqwest-backed [`Session`] that authorizes every request with an OAuth
/// bearer token.
#[derive(Debug)]
pub struct AuthorizedSession {
    http: Client,
    session_manager: SessionManager,
    max_retries: usize,
    metrics: Option<MetricsCollector>,
}

impl AuthorizedSession {
    /// Wrap an HTTP client and token holder.
    pub fn new(
        http: Client,
        session_manager: SessionManager,
        max_retries: usize,
        metrics: Option<MetricsCollector>,
    ) -> Self {
        Self {
            http,
            session_manager,
            max_retries,
            metrics,
        }
    }

    /// Replace the bearer token, e.g. after the caller refreshed it.
    pub fn set_access_token(&mut self, token: SecretString, ttl_seconds: Option<u64>) {
        self.session_manager.set_access_token(token, ttl_seconds);
    }

    /// Check if the current access token is expired.
    pub fn is_token_expired(&self) -> bool {
        self.session_manager.is_expired()
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        url: &str,
        method: &str,
    ) -> Result<SessionResponse> {
        let endpoint = endpoint_label(url);
        let response = send_with_retry(
            builder,
            self.max_retries,
            &endpoint,
            method,
            self.metrics.as_ref(),
        )
        .await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok(SessionResponse {
            status,
            url: final_url,
            body,
        })
    }
}

impl Session for AuthorizedSession {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<SessionResponse> {
        let token = self.session_manager.bearer_token()?;
        let builder = self.http.get(url).bearer_auth(token).query(query);
        self.execute(builder, url, "GET").await
    }

    async fn post<B>(&self, url: &str, body: &B) -> Result<SessionResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let token = self.session_manager.bearer_token()?;
        let builder = self.http.post(url).bearer_auth(token).json(body);
        self.execute(builder, url, "POST").await
    }
}

/// Metrics label for a URL: its path, without host or query.
fn endpoint_label(url: &str) -> String {
    reqwest::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_decodes_body() {
        let response = SessionResponse::new(200, "https://x.test/a", r#"{"ok":true}"#);
        let value: Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_json_failure_is_invalid_response() {
        let response = SessionResponse::new(200, "https://x.test/a", "<html>");
        let err = response.json::<Value>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_api_error_carries_raw_body() {
        let response = SessionResponse::new(403, "https://x.test/a", "PERMISSION_DENIED");
        match response.api_error("Failed to get forwarder") {
            ClientError::ApiError {
                status,
                url,
                message,
            } => {
                assert_eq!(status, 403);
                assert_eq!(url, "https://x.test/a");
                assert_eq!(message, "Failed to get forwarder: PERMISSION_DENIED");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_label_strips_host_and_query() {
        assert_eq!(
            endpoint_label("https://us-chronicle.googleapis.com/v1alpha/projects/p/forwarders?pageSize=5"),
            "/v1alpha/projects/p/forwarders"
        );
        assert_eq!(endpoint_label("not a url"), "not a url");
    }
}
