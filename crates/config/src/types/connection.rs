//! Connection and instance configuration types for the SecOps client.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, retries).
//! - Define the Chronicle instance coordinates (project, customer, region).
//! - Define the main `Config` structure combining connection, instance and auth.
//!
//! Does NOT handle:
//! - Configuration loading from env/dotenv (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - `base_url` never carries a trailing slash once produced by `ConfigLoader`.

use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_FORWARDER_DISPLAY_NAME, DEFAULT_REGION,
};
use crate::types::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the Chronicle API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// API root, e.g. `https://us-chronicle.googleapis.com/v1alpha`
    pub base_url: String,
    /// Whether to skip TLS verification (for intercepting proxies in development)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
    /// Seconds before token expiry at which the token is treated as expired
    #[serde(default = "default_expiry_buffer")]
    pub expiry_buffer_seconds: u64,
}

fn default_expiry_buffer() -> u64 {
    DEFAULT_EXPIRY_BUFFER_SECS
}

/// Coordinates of a Chronicle instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Google Cloud project that hosts the instance
    pub project_id: String,
    /// Chronicle customer ID (instance identifier)
    pub customer_id: String,
    /// Chronicle region, e.g. `us` or `europe`
    #[serde(default = "default_region")]
    pub region: String,
    /// Display name of the forwarder resolved when none is given explicitly
    #[serde(default = "default_forwarder_name")]
    pub default_forwarder_name: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_forwarder_name() -> String {
    DEFAULT_FORWARDER_DISPLAY_NAME.to_string()
}

impl InstanceConfig {
    /// Create instance coordinates in the default region.
    pub fn new(project_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            customer_id: customer_id.into(),
            region: default_region(),
            default_forwarder_name: default_forwarder_name(),
        }
    }

    /// Relative resource name of the instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use secops_config::InstanceConfig;
    ///
    /// let instance = InstanceConfig::new("my-project", "c-123");
    /// assert_eq!(
    ///     instance.instance_id(),
    ///     "projects/my-project/locations/us/instances/c-123"
    /// );
    /// ```
    pub fn instance_id(&self) -> String {
        format!(
            "projects/{}/locations/{}/instances/{}",
            self.project_id, self.region, self.customer_id
        )
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Chronicle instance coordinates
    pub instance: InstanceConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}
