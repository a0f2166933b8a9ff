//! Ingestion endpoints.
//!
//! # What this module handles:
//! - `POST .../logTypes/{log_type}/logs:import` (success is exactly HTTP 200)
//! - `POST .../events:import` (success is any status below 400)
//!
//! # What this module does NOT handle:
//! - Payload validation and encoding (see [`crate::client`])

use serde_json::Value;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::Result;
use crate::models::IngestResponse;
use crate::models::ingest::{LogImportRequest, UdmImportRequest};
use crate::session::Session;

/// Submit a batch of raw log entries.
///
/// # Errors
///
/// Returns [`crate::ClientError::ApiError`] ("Failed to ingest log") on any
/// status other than 200, and [`crate::ClientError::InvalidResponse`] if the
/// success body is not JSON.
pub(crate) async fn import_logs<S: Session>(
    session: &S,
    base_url: &str,
    instance_id: &str,
    log_type: &str,
    request: &LogImportRequest,
) -> Result<Value> {
    let url = format!(
        "{base_url}/{instance_id}/logTypes/{}/logs:import",
        encode_path_segment(log_type)
    );

    let response = session.post(&url, request).await?;
    if response.status != 200 {
        return Err(response.api_error("Failed to ingest log"));
    }

    response.json()
}

/// Submit a batch of UDM events.
///
/// # Errors
///
/// Returns [`crate::ClientError::ApiError`] ("Failed to ingest UDM events")
/// on status 400 or above. A success body that is not JSON is not an error;
/// it comes back as [`IngestResponse::RawText`].
pub(crate) async fn import_udm_events<S: Session>(
    session: &S,
    base_url: &str,
    instance_id: &str,
    events: &[Value],
) -> Result<IngestResponse> {
    let url = format!("{base_url}/{instance_id}/events:import");
    let request = UdmImportRequest::new(events);

    let response = session.post(&url, &request).await?;
    if response.status >= 400 {
        return Err(response.api_error("Failed to ingest UDM events"));
    }

    Ok(IngestResponse::from_body(response.text()))
}
