//! Retry helper for HTTP requests with exponential backoff.
//!
//! This module retries requests that fail with HTTP 429 (Too Many Requests)
//! using exponential backoff between attempts. Every other status, success or
//! failure, is returned to the caller untouched.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::{ErrorCategory, MetricsCollector};

/// Sends an HTTP request with automatic retry logic for HTTP 429 responses.
///
/// - Implements exponential backoff (1s, 2s, 4s = 2^attempt)
/// - Makes at most `max_retries + 1` attempts; `0` disables retrying
/// - Logs retry attempts with `tracing::debug`
/// - Records request, retry, latency and error metrics when a collector is given
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when every attempt was rate limited.
/// Propagates transport errors as `ClientError::HttpError`.
pub async fn send_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                if attempt == 0 {
                    debug!("Request builder cannot be cloned, single attempt only");
                    return send_once(builder, endpoint, method, metrics).await;
                }
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        if attempt > 0
            && let Some(m) = metrics
        {
            m.record_retry(endpoint, method, attempt);
        }

        let response = send_once(attempt_builder, endpoint, method, metrics).await?;
        let status = response.status().as_u16();

        if !ClientError::is_retryable_status(status) {
            if attempt > 0 {
                debug!(attempt = attempt + 1, status, "Request succeeded after retry");
            }
            return Ok(response);
        }

        if attempt < max_retries {
            let backoff_secs = 2u64.pow(attempt as u32);
            debug!(
                attempt = attempt + 1,
                max_retries = max_retries + 1,
                backoff_secs,
                "Rate limited (HTTP 429), retrying with exponential backoff"
            );
            tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
        }
    }

    debug!(
        attempts = max_retries + 1,
        "Max retries exhausted for rate-limited request"
    );
    if let Some(m) = metrics {
        m.record_error(endpoint, method, ErrorCategory::RateLimited);
    }
    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Send a single attempt, recording metrics around it.
async fn send_once(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }
    let started = Instant::now();

    match builder.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, started.elapsed(), Some(status));
                if let Some(category) = ErrorCategory::from_status(status) {
                    m.record_error(endpoint, method, category);
                }
            }
            Ok(response)
        }
        Err(e) => {
            let err = ClientError::from(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, started.elapsed(), None);
                m.record_error(endpoint, method, ErrorCategory::from(&err));
            }
            Err(err)
        }
    }
}
