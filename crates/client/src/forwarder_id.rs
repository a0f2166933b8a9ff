//! Conversion between forwarder resource names and short forwarder IDs.
//!
//! A forwarder's full resource name looks like
//! `projects/P/locations/R/instances/C/forwarders/ID`; its identity is the
//! trailing `ID` segment.

use crate::error::{ClientError, Result};

/// Extract the forwarder ID from a full forwarder resource name.
///
/// A name without any `/` is already an ID and is returned unchanged.
///
/// # Errors
///
/// Returns [`ClientError::InvalidArgument`] if `name` is empty or consists
/// only of separators.
///
/// # Examples
///
/// ```
/// use secops_client::forwarder_id::extract_forwarder_id;
///
/// let name = "projects/123/locations/us/instances/abc/forwarders/xyz";
/// assert_eq!(extract_forwarder_id(name).unwrap(), "xyz");
/// assert_eq!(extract_forwarder_id("xyz").unwrap(), "xyz");
/// assert!(extract_forwarder_id("").is_err());
/// ```
pub fn extract_forwarder_id(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(ClientError::InvalidArgument(
            "Forwarder name cannot be empty".to_string(),
        ));
    }

    if !name.contains('/') {
        return Ok(name);
    }

    name.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .ok_or_else(|| {
            ClientError::InvalidArgument(format!("Invalid forwarder name format: {name}"))
        })
}

/// Build the fully-qualified forwarder resource name for the import payload.
///
/// A bare ID is placed under `instance_id`; anything containing `/` is taken
/// to be a resource name already and is returned unchanged.
pub fn forwarder_resource_name(instance_id: &str, forwarder_id: &str) -> String {
    if forwarder_id.contains('/') {
        forwarder_id.to_string()
    } else {
        format!("{instance_id}/forwarders/{forwarder_id}")
    }
}
