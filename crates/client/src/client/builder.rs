//! Client builder for constructing [`ChronicleClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (instance coordinates, auth_strategy)
//! - Deriving the regional base URL and the instance resource name
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`ChronicleClient`] methods)
//! - Bearer token storage (handled by [`SessionManager`] in `auth.rs`)
//!
//! # Invariants
//! - `project_id`, `customer_id` and `auth_strategy` must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes

use std::time::Duration;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::ChronicleClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::session::AuthorizedSession;
use secops_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_FORWARDER_DISPLAY_NAME, DEFAULT_MAX_REDIRECTS,
        DEFAULT_MAX_RETRIES, DEFAULT_REGION, DEFAULT_TIMEOUT_SECS, regional_base_url,
    },
};

/// Builder for creating a new [`ChronicleClient`].
///
/// # Example
///
/// ```rust,ignore
/// use secops_client::{AuthStrategy, ChronicleClient};
/// use secrecy::SecretString;
///
/// let client = ChronicleClient::builder()
///     .project_id("my-project")
///     .customer_id("c-123")
///     .region("europe")
///     .auth_strategy(AuthStrategy::AccessToken {
///         token: SecretString::new("ya29....".to_string().into()),
///         ttl_seconds: Some(3600),
///     })
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct ChronicleClientBuilder {
    base_url: Option<String>,
    project_id: Option<String>,
    customer_id: Option<String>,
    region: String,
    default_forwarder_name: String,
    auth_strategy: Option<AuthStrategy>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    expiry_buffer_seconds: u64,
    metrics: Option<MetricsCollector>,
}

impl Default for ChronicleClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            project_id: None,
            customer_id: None,
            region: DEFAULT_REGION.to_string(),
            default_forwarder_name: DEFAULT_FORWARDER_DISPLAY_NAME.to_string(),
            auth_strategy: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
            metrics: None,
        }
    }
}

impl ChronicleClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API root, e.g. to point at a mock server.
    ///
    /// Defaults to `https://{region}-chronicle.googleapis.com/v1alpha`.
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the Google Cloud project hosting the instance.
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Set the Chronicle customer ID.
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Set the Chronicle region. Default is `us`.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the display name resolved by `get_or_create_forwarder(None)`.
    pub fn default_forwarder_name(mut self, name: impl Into<String>) -> Self {
        self.default_forwarder_name = name.into();
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this with a trusted intercepting proxy during development.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    ///
    /// Default is 3 retries with exponential backoff (1s, 2s, 4s delays).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Treat the access token as expired this many seconds early.
    pub fn expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.expiry_buffer_seconds = buffer;
        self
    }

    /// Set the metrics collector for API call performance tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from configuration.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use secops_client::ChronicleClient;
    /// use secops_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().load_dotenv()?.from_env()?.build()?;
    /// let client = ChronicleClient::builder().from_config(&config).build()?;
    /// ```
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::AccessToken { token, ttl_seconds } => AuthStrategy::AccessToken {
                token: token.clone(),
                ttl_seconds: *ttl_seconds,
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.project_id = Some(config.instance.project_id.clone());
        self.customer_id = Some(config.instance.customer_id.clone());
        self.region = config.instance.region.clone();
        self.default_forwarder_name = config.instance.default_forwarder_name.clone();
        self.auth_strategy = Some(auth_strategy);
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.expiry_buffer_seconds = config.connection.expiry_buffer_seconds;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ChronicleClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if `project_id`, `customer_id`,
    /// `region` or `default_forwarder_name` is missing or empty.
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided.
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an http(s) URL.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ChronicleClient> {
        let project_id = required("project_id", self.project_id)?;
        let customer_id = required("customer_id", self.customer_id)?;
        let region = required("region", Some(self.region))?;
        let default_forwarder_name =
            required("default_forwarder_name", Some(self.default_forwarder_name))?;

        let base_url = match self.base_url {
            Some(url) => {
                let url = Self::normalize_base_url(url);
                if !url.starts_with("https://") && !url.starts_with("http://") {
                    return Err(ClientError::InvalidUrl(format!(
                        "base_url must start with http:// or https://: {url}"
                    )));
                }
                url
            }
            None => regional_base_url(&region),
        };

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;
        let session = AuthorizedSession::new(
            http,
            SessionManager::with_expiry_buffer(auth_strategy, self.expiry_buffer_seconds),
            self.max_retries,
            self.metrics,
        );

        let instance_id = format!("projects/{project_id}/locations/{region}/instances/{customer_id}");
        tracing::debug!(base_url = %base_url, instance_id = %instance_id, "Built Chronicle client");

        Ok(ChronicleClient::with_session(
            session,
            base_url,
            instance_id,
            default_forwarder_name,
        ))
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClientError::InvalidArgument(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secops_config::InstanceConfig;
    use secrecy::SecretString;

    fn token() -> AuthStrategy {
        AuthStrategy::AccessToken {
            token: SecretString::new("test-token".to_string().into()),
            ttl_seconds: None,
        }
    }

    fn config() -> Config {
        Config {
            connection: secops_config::ConnectionConfig {
                base_url: "https://europe-chronicle.googleapis.com/v1alpha".to_string(),
                skip_verify: true,
                timeout: Duration::from_secs(120),
                max_retries: 5,
                expiry_buffer_seconds: 90,
            },
            instance: InstanceConfig {
                region: "europe".to_string(),
                default_forwarder_name: "Edge".to_string(),
                ..InstanceConfig::new("proj", "cust")
            },
            auth: secops_config::AuthConfig {
                strategy: secops_config::AuthStrategy::AccessToken {
                    token: SecretString::new("cfg-token".to_string().into()),
                    ttl_seconds: Some(600),
                },
            },
        }
    }

    #[test]
    fn test_build_derives_regional_url_and_instance() {
        let client = ChronicleClient::builder()
            .project_id("proj")
            .customer_id("cust")
            .region("asia-southeast1")
            .auth_strategy(token())
            .build()
            .unwrap();

        assert_eq!(
            client.base_url(),
            "https://asia-southeast1-chronicle.googleapis.com/v1alpha"
        );
        assert_eq!(
            client.instance_id(),
            "projects/proj/locations/asia-southeast1/instances/cust"
        );
        assert_eq!(client.default_forwarder_name(), "Wrapper-SDK-Forwarder");
        assert_eq!(client.cached_default_forwarder_id(), None);
    }

    #[test]
    fn test_build_normalizes_base_url_override() {
        let client = ChronicleClient::builder()
            .base_url("http://127.0.0.1:8080/v1alpha//")
            .project_id("proj")
            .customer_id("cust")
            .auth_strategy(token())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080/v1alpha");
    }

    #[test]
    fn test_build_requires_instance_coordinates() {
        let err = ChronicleClient::builder()
            .customer_id("cust")
            .auth_strategy(token())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(m) if m == "project_id is required"));

        let err = ChronicleClient::builder()
            .project_id("proj")
            .customer_id("  ")
            .auth_strategy(token())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(m) if m == "customer_id is required"));
    }

    #[test]
    fn test_build_rejects_blank_default_forwarder_name() {
        for name in ["", "   "] {
            let err = ChronicleClient::builder()
                .project_id("proj")
                .customer_id("cust")
                .default_forwarder_name(name)
                .auth_strategy(token())
                .build()
                .unwrap_err();
            assert!(
                matches!(err, ClientError::InvalidArgument(ref m) if m == "default_forwarder_name is required"),
                "unexpected error for {name:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_build_requires_auth() {
        let err = ChronicleClient::builder()
            .project_id("proj")
            .customer_id("cust")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(_)));
    }

    #[test]
    fn test_build_rejects_non_http_base_url() {
        let err = ChronicleClient::builder()
            .base_url("ftp://example.com")
            .project_id("proj")
            .customer_id("cust")
            .auth_strategy(token())
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let builder = ChronicleClient::builder().from_config(&config());

        assert_eq!(
            builder.base_url.as_deref(),
            Some("https://europe-chronicle.googleapis.com/v1alpha")
        );
        assert_eq!(builder.project_id.as_deref(), Some("proj"));
        assert_eq!(builder.region, "europe");
        assert_eq!(builder.default_forwarder_name, "Edge");
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 5);
        assert_eq!(builder.expiry_buffer_seconds, 90);
        assert!(matches!(
            builder.auth_strategy,
            Some(AuthStrategy::AccessToken {
                ttl_seconds: Some(600),
                ..
            })
        ));

        let client = builder.build().unwrap();
        assert_eq!(
            client.instance_id(),
            "projects/proj/locations/europe/instances/cust"
        );
        assert_eq!(client.default_forwarder_name(), "Edge");
        assert!(!client.is_token_expired());
    }

    #[test]
    fn test_normalize_base_url_trailing_slash() {
        assert_eq!(
            ChronicleClientBuilder::normalize_base_url("https://x.test/v1alpha/".to_string()),
            "https://x.test/v1alpha"
        );
    }
}
