//! Timestamp formatting for ingestion payloads.
//!
//! The log import and UDM import endpoints expect different timestamp
//! renderings; both are always UTC with a literal `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};

/// `strftime` pattern for log import timestamps: microsecond precision, literal `Z`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format a timestamp for the log import endpoint.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use secops_client::format::format_log_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 5).unwrap();
/// assert_eq!(format_log_timestamp(&ts), "2025-03-01T12:30:05.000000Z");
/// ```
pub fn format_log_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Format a timestamp as RFC 3339 / ISO-8601 with a `Z` suffix, as used for
/// back-filled UDM `metadata.event_timestamp` values.
pub fn format_udm_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
