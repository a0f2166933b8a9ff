//! Metrics collection for API call performance.
//!
//! This module provides metrics collection for Chronicle API calls, including:
//! - Request latency histograms
//! - Request counters (total, retries, errors)
//! - Error categorization
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a `metrics` recorder in the application)
//!
//! # Invariants
//! - All metrics use consistent label names: `endpoint`, `method`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "secops_api_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "secops_api_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "secops_api_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "secops_api_errors_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport-level errors (connection refused, DNS, etc.)
    Transport,
    /// HTTP 4xx client errors
    Http4xx,
    /// HTTP 5xx server errors
    Http5xx,
    /// Request timeout
    Timeout,
    /// Rate limiting outlasted the retry budget
    RateLimited,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::RateLimited => "rate_limited",
            ErrorCategory::Unknown => "unknown",
        }
    }

    /// Categorize a response status, or `None` for non-error statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400..=499 => Some(ErrorCategory::Http4xx),
            500..=599 => Some(ErrorCategory::Http5xx),
            _ => None,
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => {
                Self::from_status(*status).unwrap_or(ErrorCategory::Unknown)
            }
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() || e.is_request() => {
                ErrorCategory::Transport
            }
            ClientError::MaxRetriesExceeded(_) => ErrorCategory::RateLimited,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for Chronicle API calls.
///
/// A lightweight wrapper around the `metrics` crate macros, providing
/// type-safe methods for recording API metrics with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create a new, enabled metrics collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a disabled metrics collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of an API request.
    ///
    /// `status` is `None` if the request failed before receiving a response.
    pub fn record_request_duration(
        &self,
        endpoint: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt, including retries.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry attempt (1-based, excluding the initial request).
    pub fn record_retry(&self, endpoint: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    /// Record an error.
    pub fn record_error(&self, endpoint: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_from_status() {
        assert_eq!(ErrorCategory::from_status(403), Some(ErrorCategory::Http4xx));
        assert_eq!(ErrorCategory::from_status(503), Some(ErrorCategory::Http5xx));
        assert_eq!(ErrorCategory::from_status(200), None);
        assert_eq!(ErrorCategory::from_status(302), None);
    }

    #[test]
    fn test_error_category_from_client_error() {
        let err = ClientError::ApiError {
            status: 404,
            url: "u".to_string(),
            message: "m".to_string(),
        };
        assert_eq!(ErrorCategory::from(&err), ErrorCategory::Http4xx);
        assert_eq!(
            ErrorCategory::from(&ClientError::MaxRetriesExceeded(4)),
            ErrorCategory::RateLimited
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::SessionExpired),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_disabled_collector_records_nothing() {
        let collector = MetricsCollector::disabled();
        assert!(!collector.is_enabled());
        collector.record_request("/forwarders", "GET");
        collector.record_request_duration("/forwarders", "GET", Duration::from_millis(5), None);
        collector.record_retry("/forwarders", "GET", 1);
        collector.record_error("/forwarders", "GET", ErrorCategory::Transport);
    }

    #[test]
    fn test_error_category_labels() {
        assert_eq!(ErrorCategory::Transport.as_str(), "transport");
        assert_eq!(ErrorCategory::Http4xx.as_str(), "http_4xx");
        assert_eq!(ErrorCategory::Http5xx.as_str(), "http_5xx");
        assert_eq!(ErrorCategory::Timeout.as_str(), "timeout");
        assert_eq!(ErrorCategory::RateLimited.as_str(), "rate_limited");
        assert_eq!(ErrorCategory::Unknown.as_str(), "unknown");
    }
}
