//! Forwarder models for the Chronicle forwarders API.
//!
//! # What this module handles:
//! - Deserialization of forwarder resources and list pages
//! - The create-forwarder request payload
//!
//! # What this module does NOT handle:
//! - Direct HTTP API calls (see [`crate::endpoints::forwarders`])
//! - Forwarder resolution and caching (see [`crate::client`])
//!
//! # Invariants
//! - Fields the client does not model are kept in `extra` so a forwarder
//!   read from the API serializes back without loss

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::forwarder_id::extract_forwarder_id;

/// A Chronicle forwarder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forwarder {
    /// Full resource name, `projects/P/locations/R/instances/C/forwarders/ID`.
    #[serde(default)]
    pub name: String,
    /// User-chosen display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ForwarderConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Forwarder {
    /// The short forwarder ID, i.e. the last segment of [`Forwarder::name`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidArgument`] if the name is empty
    /// or malformed.
    pub fn id(&self) -> Result<&str> {
        extract_forwarder_id(&self.name)
    }

    /// Whether this forwarder's display name is exactly `display_name`.
    pub fn has_display_name(&self, display_name: &str) -> bool {
        self.display_name.as_deref() == Some(display_name)
    }
}

/// Forwarder configuration block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderConfig {
    #[serde(default)]
    pub upload_compression: bool,
    #[serde(default)]
    pub metadata: ForwarderMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_settings: Option<ServerSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata attached to every log a forwarder uploads.
///
/// Serializes to `{}` when nothing is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<ForwarderLabel>,
}

impl ForwarderMetadata {
    /// Set the asset namespace.
    pub fn with_asset_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.asset_namespace = Some(namespace.into());
        self
    }

    /// Append a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(ForwarderLabel {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// A single forwarder metadata label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwarderLabel {
    pub key: String,
    pub value: String,
}

/// Forwarder server settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub http_settings: HttpSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// HTTP server settings; the create payload always sends an empty route table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSettings {
    #[serde(default)]
    pub route_settings: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of forwarders, or the concatenation of all pages once
/// [`crate::ChronicleClient::list_forwarders`] has followed every token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderListResponse {
    #[serde(default)]
    pub forwarders: Vec<Forwarder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Parameters for creating a forwarder.
#[derive(Debug, Clone, Default)]
pub struct CreateForwarderParams {
    /// Display name of the new forwarder (required).
    pub display_name: String,
    /// Metadata applied to uploaded logs.
    pub metadata: Option<ForwarderMetadata>,
    /// Whether uploaded data is compressed.
    pub upload_compression: bool,
    /// Whether the forwarder's server functionality is enabled.
    pub enable_server: bool,
}

impl CreateForwarderParams {
    /// Parameters for a forwarder with default settings.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Set the forwarder metadata.
    pub fn with_metadata(mut self, metadata: ForwarderMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Enable upload compression.
    pub fn with_upload_compression(mut self, enabled: bool) -> Self {
        self.upload_compression = enabled;
        self
    }

    /// Enable the forwarder's server functionality.
    pub fn with_server_enabled(mut self, enabled: bool) -> Self {
        self.enable_server = enabled;
        self
    }
}

/// Wire payload for `POST .../forwarders`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateForwarderRequest<'a> {
    display_name: &'a str,
    config: ForwarderConfig,
}

impl<'a> From<&'a CreateForwarderParams> for CreateForwarderRequest<'a> {
    fn from(params: &'a CreateForwarderParams) -> Self {
        Self {
            display_name: &params.display_name,
            config: ForwarderConfig {
                upload_compression: params.upload_compression,
                metadata: params.metadata.clone().unwrap_or_default(),
                server_settings: Some(ServerSettings {
                    enabled: params.enable_server,
                    ..ServerSettings::default()
                }),
                extra: Map::new(),
            },
        }
    }
}
