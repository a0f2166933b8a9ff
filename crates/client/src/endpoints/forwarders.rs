//! Forwarder management endpoints.
//!
//! This module provides low-level functions for the Chronicle forwarders
//! collection, one HTTP request per call.
//!
//! # What this module handles:
//! - Building forwarder URLs and query parameters
//! - Status checks: anything other than HTTP 200 is an error
//!
//! # What this module does NOT handle:
//! - Following page tokens (see [`crate::client`])
//! - Display name lookup and default forwarder caching (see [`crate::client`])

use tracing::debug;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::Result;
use crate::models::forwarders::CreateForwarderRequest;
use crate::models::{CreateForwarderParams, Forwarder, ForwarderListResponse};
use crate::session::Session;

fn forwarders_url(base_url: &str, instance_id: &str) -> String {
    format!("{base_url}/{instance_id}/forwarders")
}

/// Fetch a single page of forwarders.
///
/// `page_size` is sent as given; callers clamp it.
///
/// # Errors
///
/// Returns [`crate::ClientError::ApiError`] ("Failed to list forwarders") on
/// any status other than 200.
pub async fn list_forwarders_page<S: Session>(
    session: &S,
    base_url: &str,
    instance_id: &str,
    page_size: u32,
    page_token: Option<&str>,
) -> Result<ForwarderListResponse> {
    let url = forwarders_url(base_url, instance_id);

    let mut query: Vec<(&str, String)> = vec![("pageSize", page_size.to_string())];
    if let Some(token) = page_token.filter(|t| !t.is_empty()) {
        query.push(("pageToken", token.to_string()));
    }

    let response = session.get(&url, &query).await?;
    if response.status != 200 {
        return Err(response.api_error("Failed to list forwarders"));
    }

    let page: ForwarderListResponse = response.json()?;
    debug!(
        count = page.forwarders.len(),
        has_next = page.next_page_token.is_some(),
        "Fetched forwarders page"
    );
    Ok(page)
}

/// Create a forwarder.
///
/// # Errors
///
/// Returns [`crate::ClientError::ApiError`] ("Failed to create forwarder") on
/// any status other than 200.
pub async fn create_forwarder<S: Session>(
    session: &S,
    base_url: &str,
    instance_id: &str,
    params: &CreateForwarderParams,
) -> Result<Forwarder> {
    let url = forwarders_url(base_url, instance_id);
    let body = CreateForwarderRequest::from(params);

    let response = session.post(&url, &body).await?;
    if response.status != 200 {
        return Err(response.api_error("Failed to create forwarder"));
    }

    response.json()
}

/// Get a forwarder by its short ID.
///
/// # Errors
///
/// Returns [`crate::ClientError::ApiError`] ("Failed to get forwarder") on
/// any status other than 200, including 404.
pub async fn get_forwarder<S: Session>(
    session: &S,
    base_url: &str,
    instance_id: &str,
    forwarder_id: &str,
) -> Result<Forwarder> {
    let url = format!(
        "{}/{}",
        forwarders_url(base_url, instance_id),
        encode_path_segment(forwarder_id)
    );

    let response = session.get(&url, &[]).await?;
    if response.status != 200 {
        return Err(response.api_error("Failed to get forwarder"));
    }

    response.json()
}
