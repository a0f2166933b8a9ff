//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SECOPS_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Parse an environment variable into `T`, mapping failures to `InvalidValue`.
fn parse_env<T: FromStr>(key: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(key)
        .map(|raw| {
            raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: key.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SECOPS_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(project) = env_var_or_none("SECOPS_PROJECT_ID") {
        loader.set_project_id(Some(project));
    }
    if let Some(customer) = env_var_or_none("SECOPS_CUSTOMER_ID") {
        loader.set_customer_id(Some(customer));
    }
    if let Some(region) = env_var_or_none("SECOPS_REGION") {
        loader.set_region(Some(region));
    }
    if let Some(name) = env_var_or_none("SECOPS_FORWARDER_NAME") {
        loader.set_default_forwarder_name(Some(name));
    }
    if let Some(token) = env_var_or_none("SECOPS_ACCESS_TOKEN") {
        loader.set_access_token(Some(SecretString::new(token.into())));
    }
    if let Some(ttl) = parse_env::<u64>("SECOPS_ACCESS_TOKEN_TTL", "must be a number")? {
        loader.set_token_ttl_seconds(Some(ttl));
    }
    if let Some(skip) = parse_env::<bool>("SECOPS_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("SECOPS_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>("SECOPS_MAX_RETRIES", "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    Ok(())
}
