//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Build and validate the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Later calls win: `from_env()` overrides earlier builder values and vice versa.
//! - Without an explicit base URL, the regional Chronicle endpoint is derived.

use secrecy::SecretString;
use std::time::Duration;
use tracing::debug;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_FORWARDER_DISPLAY_NAME, DEFAULT_MAX_RETRIES,
    DEFAULT_REGION, DEFAULT_TIMEOUT_SECS, MAX_MAX_RETRIES, MAX_TIMEOUT_SECS, regional_base_url,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, InstanceConfig};

/// Configuration loader that builds config from environment variables and builder values.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    project_id: Option<String>,
    customer_id: Option<String>,
    region: Option<String>,
    default_forwarder_name: Option<String>,
    access_token: Option<SecretString>,
    token_ttl_seconds: Option<u64>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    expiry_buffer_seconds: Option<u64>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file has invalid syntax
    /// - `ConfigError::DotenvIo` if the file exists but cannot be read
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from `SECOPS_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the API base URL (overrides the regional default).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the Google Cloud project ID.
    pub fn with_project_id(mut self, project_id: String) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Set the Chronicle customer ID.
    pub fn with_customer_id(mut self, customer_id: String) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Set the Chronicle region.
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }

    /// Set the display name of the default forwarder.
    pub fn with_default_forwarder_name(mut self, name: String) -> Self {
        self.default_forwarder_name = Some(name);
        self
    }

    /// Set the OAuth access token.
    pub fn with_access_token(mut self, token: String) -> Self {
        self.access_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the remaining lifetime of the access token.
    pub fn with_token_ttl_seconds(mut self, ttl: u64) -> Self {
        self.token_ttl_seconds = Some(ttl);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set the token expiry buffer in seconds.
    pub fn with_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.expiry_buffer_seconds = Some(buffer);
        self
    }

    pub(super) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(super) fn set_project_id(&mut self, project_id: Option<String>) {
        self.project_id = project_id;
    }

    pub(super) fn set_customer_id(&mut self, customer_id: Option<String>) {
        self.customer_id = customer_id;
    }

    pub(super) fn set_region(&mut self, region: Option<String>) {
        self.region = region;
    }

    pub(super) fn set_default_forwarder_name(&mut self, name: Option<String>) {
        self.default_forwarder_name = name;
    }

    pub(super) fn set_access_token(&mut self, token: Option<SecretString>) {
        self.access_token = token;
    }

    pub(super) fn set_token_ttl_seconds(&mut self, ttl: Option<u64>) {
        self.token_ttl_seconds = ttl;
    }

    pub(super) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(super) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(super) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Missing` if project or customer ID is absent
    /// - `ConfigError::MissingAuth` if no access token is configured
    /// - `ConfigError::InvalidValue` for a malformed base URL
    /// - `ConfigError::InvalidTimeout` / `InvalidMaxRetries` for out-of-range values
    pub fn build(self) -> Result<Config, ConfigError> {
        let project_id = self.project_id.ok_or(ConfigError::Missing("project_id"))?;
        let customer_id = self
            .customer_id
            .ok_or(ConfigError::Missing("customer_id"))?;
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_string());

        let base_url = match self.base_url.as_deref() {
            Some(raw) => validate_and_normalize_base_url(raw)?,
            None => regional_base_url(&region),
        };

        let token = self.access_token.ok_or(ConfigError::MissingAuth)?;

        let connection = ConnectionConfig {
            base_url,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            expiry_buffer_seconds: self
                .expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        };

        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            instance: InstanceConfig {
                project_id,
                customer_id,
                region,
                default_forwarder_name: self
                    .default_forwarder_name
                    .unwrap_or_else(|| DEFAULT_FORWARDER_DISPLAY_NAME.to_string()),
            },
            auth: AuthConfig {
                strategy: AuthStrategy::AccessToken {
                    token,
                    ttl_seconds: self.token_ttl_seconds,
                },
            },
        })
    }

    /// Validates timeout and retry bounds.
    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }

        Ok(())
    }
}

fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::Missing("base_url"));
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!("must be an absolute http(s) URL with a host: {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: "host is required".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
