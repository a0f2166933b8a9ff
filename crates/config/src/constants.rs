//! Centralized constants for the SecOps client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default buffer time before access token expiry at which the token is
/// treated as already expired.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of retries for rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed value for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Chronicle Instance Defaults
// =============================================================================

/// Default Chronicle region.
pub const DEFAULT_REGION: &str = "us";

/// API version segment used when deriving the base URL from the region.
pub const DEFAULT_API_VERSION: &str = "v1alpha";

// =============================================================================
// Forwarder Defaults
// =============================================================================

/// Display name of the forwarder resolved when the caller names none.
pub const DEFAULT_FORWARDER_DISPLAY_NAME: &str = "Wrapper-SDK-Forwarder";

/// Largest page size the forwarders endpoint accepts.
pub const MAX_FORWARDER_PAGE_SIZE: u32 = 1000;

/// Derive the regional Chronicle API base URL.
///
/// # Examples
///
/// ```
/// use secops_config::constants::regional_base_url;
///
/// assert_eq!(
///     regional_base_url("europe"),
///     "https://europe-chronicle.googleapis.com/v1alpha"
/// );
/// ```
pub fn regional_base_url(region: &str) -> String {
    format!("https://{region}-chronicle.googleapis.com/{DEFAULT_API_VERSION}")
}
