//! Ingestion models for raw log import and UDM event import.
//!
//! # What this module handles:
//! - Caller-facing inputs ([`IngestLogParams`], [`LogMessages`], [`UdmEvents`])
//! - The UDM import result ([`IngestResponse`])
//! - Wire payloads for `logs:import` and `events:import`
//!
//! # What this module does NOT handle:
//! - Validation, encoding and timestamp defaulting (see [`crate::client`])
//! - Direct HTTP API calls (see [`crate::endpoints::ingest`])
//!
//! # Invariants
//! - Single and batch inputs normalize to the same list, so one message and a
//!   one-element batch produce identical requests

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One raw log message or a batch of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessages {
    Single(String),
    Batch(Vec<String>),
}

impl LogMessages {
    /// Normalize into a list of messages.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(message) => vec![message],
            Self::Batch(messages) => messages,
        }
    }
}

impl From<String> for LogMessages {
    fn from(message: String) -> Self {
        Self::Single(message)
    }
}

impl From<&str> for LogMessages {
    fn from(message: &str) -> Self {
        Self::Single(message.to_string())
    }
}

impl From<Vec<String>> for LogMessages {
    fn from(messages: Vec<String>) -> Self {
        Self::Batch(messages)
    }
}

impl From<Vec<&str>> for LogMessages {
    fn from(messages: Vec<&str>) -> Self {
        Self::Batch(messages.into_iter().map(str::to_string).collect())
    }
}

/// Parameters for [`crate::ChronicleClient::ingest_log`].
///
/// # Example
///
/// ```
/// use secops_client::models::IngestLogParams;
///
/// let params = IngestLogParams::new("OKTA", r#"{"actor": "alice"}"#)
///     .with_namespace("corp")
///     .with_label("env", "prod");
/// assert_eq!(params.labels["env"], "prod");
/// ```
#[derive(Debug, Clone)]
pub struct IngestLogParams {
    /// Chronicle log type, e.g. `OKTA`.
    pub log_type: String,
    /// Raw log payload(s).
    pub messages: LogMessages,
    /// When the log was produced. Defaults to now.
    pub entry_time: Option<DateTime<Utc>>,
    /// When the log was collected. Defaults to now; must not precede `entry_time`.
    pub collection_time: Option<DateTime<Utc>>,
    /// Environment namespace attached to every entry.
    pub namespace: Option<String>,
    /// Labels attached to every entry.
    pub labels: BTreeMap<String, String>,
    /// Forwarder ID or full resource name. Defaults to the client's default forwarder.
    pub forwarder_id: Option<String>,
    /// Submit even if `log_type` is not in [`crate::log_types`].
    pub force_log_type: bool,
}

impl IngestLogParams {
    pub fn new(log_type: impl Into<String>, messages: impl Into<LogMessages>) -> Self {
        Self {
            log_type: log_type.into(),
            messages: messages.into(),
            entry_time: None,
            collection_time: None,
            namespace: None,
            labels: BTreeMap::new(),
            forwarder_id: None,
            force_log_type: false,
        }
    }

    pub fn with_entry_time(mut self, entry_time: DateTime<Utc>) -> Self {
        self.entry_time = Some(entry_time);
        self
    }

    pub fn with_collection_time(mut self, collection_time: DateTime<Utc>) -> Self {
        self.collection_time = Some(collection_time);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_forwarder_id(mut self, forwarder_id: impl Into<String>) -> Self {
        self.forwarder_id = Some(forwarder_id.into());
        self
    }

    pub fn with_force_log_type(mut self, force: bool) -> Self {
        self.force_log_type = force;
        self
    }
}

/// One UDM event or a batch of them.
#[derive(Debug, Clone, PartialEq)]
pub enum UdmEvents {
    Single(Value),
    Batch(Vec<Value>),
}

impl UdmEvents {
    /// Normalize into a list of events.
    pub fn into_vec(self) -> Vec<Value> {
        match self {
            Self::Single(event) => vec![event],
            Self::Batch(events) => events,
        }
    }
}

/// A JSON array is taken as a batch; any other value is a single event.
impl From<Value> for UdmEvents {
    fn from(event: Value) -> Self {
        match event {
            Value::Array(events) => Self::Batch(events),
            event => Self::Single(event),
        }
    }
}

impl From<Vec<Value>> for UdmEvents {
    fn from(events: Vec<Value>) -> Self {
        Self::Batch(events)
    }
}

impl From<&Value> for UdmEvents {
    fn from(event: &Value) -> Self {
        Self::from(event.clone())
    }
}

impl From<&[Value]> for UdmEvents {
    fn from(events: &[Value]) -> Self {
        Self::Batch(events.to_vec())
    }
}

impl From<&Vec<Value>> for UdmEvents {
    fn from(events: &Vec<Value>) -> Self {
        Self::Batch(events.clone())
    }
}

/// Result of a UDM import.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestResponse {
    /// The decoded response body; an empty body decodes to `{}`.
    Json(Value),
    /// A non-empty body that was not valid JSON.
    RawText(String),
}

impl IngestResponse {
    /// Interpret a successful response body.
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::Json(Value::Object(serde_json::Map::new()));
        }
        match serde_json::from_str(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::RawText(body.to_string()),
        }
    }

    /// The decoded body, if it was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::RawText(_) => None,
        }
    }
}

/// Wire payload for `POST .../logTypes/{type}/logs:import`.
#[derive(Debug, Serialize)]
pub(crate) struct LogImportRequest {
    pub inline_source: InlineLogSource,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineLogSource {
    pub logs: Vec<LogEntry>,
    pub forwarder: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LogEntry {
    /// Base64 of the UTF-8 message bytes.
    pub data: String,
    pub log_entry_time: String,
    pub collection_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, LogLabel>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct LogLabel {
    pub value: String,
}

/// Wire payload for `POST .../events:import`.
#[derive(Debug, Serialize)]
pub(crate) struct UdmImportRequest<'a> {
    pub inline_source: InlineEventSource<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineEventSource<'a> {
    pub events: Vec<UdmEnvelope<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UdmEnvelope<'a> {
    pub udm: &'a Value,
}

impl<'a> UdmImportRequest<'a> {
    pub fn new(events: &'a [Value]) -> Self {
        Self {
            inline_source: InlineEventSource {
                events: events.iter().map(|udm| UdmEnvelope { udm }).collect(),
            },
        }
    }
}
