//! UDM event ingestion for [`ChronicleClient`].
//!
//! # What this module handles:
//! - Shape checks on each event (`metadata` must be an object)
//! - Back-filling `metadata.event_timestamp` and `metadata.id`
//!
//! # Invariants
//! - Caller-supplied events are cloned before back-fill and never modified
//! - Every validation failure is returned before the request is sent

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::client::ChronicleClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::format::format_udm_timestamp;
use crate::models::{IngestResponse, UdmEvents};
use crate::session::Session;

impl<S: Session> ChronicleClient<S> {
    /// Ingest one or more UDM events.
    ///
    /// Events missing `metadata.event_timestamp` get the current time. When
    /// `add_missing_ids` is set, events missing `metadata.id` get a random
    /// UUID.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidArgument`] if no events are given, or an event
    ///   is not an object with an object `metadata` field
    /// - [`ClientError::ApiError`] ("Failed to ingest UDM events") if the API
    ///   returns 400 or above
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use serde_json::json;
    ///
    /// let event = json!({
    ///     "metadata": {"event_type": "NETWORK_CONNECTION", "product_name": "My Product"},
    ///     "principal": {"ip": "192.168.1.100"},
    ///     "target": {"ip": "10.0.0.1"}
    /// });
    /// client.ingest_udm(&event, true).await?;
    /// ```
    pub async fn ingest_udm(
        &self,
        events: impl Into<UdmEvents>,
        add_missing_ids: bool,
    ) -> Result<IngestResponse> {
        let mut events = events.into().into_vec();
        if events.is_empty() {
            return Err(ClientError::InvalidArgument(
                "No UDM events provided".to_string(),
            ));
        }

        for event in &mut events {
            let metadata = event_metadata(event)?;
            if !metadata.contains_key("event_timestamp") {
                metadata.insert(
                    "event_timestamp".to_string(),
                    Value::String(format_udm_timestamp(&Utc::now())),
                );
            }
            if add_missing_ids && !metadata.contains_key("id") {
                metadata.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
            }
        }

        debug!(count = events.len(), "Ingesting UDM events");
        endpoints::import_udm_events(&self.session, &self.base_url, &self.instance_id, &events)
            .await
    }
}

fn event_metadata(event: &mut Value) -> Result<&mut Map<String, Value>> {
    let type_name = json_type_name(event);
    let Value::Object(fields) = event else {
        return Err(ClientError::InvalidArgument(format!(
            "Invalid UDM event type: {type_name}. Events must be JSON objects."
        )));
    };

    match fields.get_mut("metadata") {
        Some(Value::Object(metadata)) => Ok(metadata),
        Some(_) => Err(ClientError::InvalidArgument(
            "UDM 'metadata' must be an object".to_string(),
        )),
        None => Err(ClientError::InvalidArgument(
            "UDM event missing required 'metadata' section".to_string(),
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionResponse;
    use crate::testing::FakeSession;
    use serde_json::json;

    fn client(session: FakeSession) -> ChronicleClient<FakeSession> {
        ChronicleClient::with_session(
            session,
            "https://chronicle.test/v1alpha",
            "projects/p/locations/us/instances/c",
            "Wrapper-SDK-Forwarder",
        )
    }

    #[test]
    fn test_event_metadata_shape_errors() {
        let cases = [
            (json!("text"), "string"),
            (json!({"principal": {}}), "missing required 'metadata'"),
            (json!({"metadata": []}), "must be an object"),
        ];
        for (mut event, expected) in cases {
            match event_metadata(&mut event) {
                Err(ClientError::InvalidArgument(msg)) => {
                    assert!(msg.contains(expected), "{msg} should contain {expected}");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let client = client(FakeSession::new());
        let err = client.ingest_udm(Vec::<Value>::new(), true).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument(m) if m == "No UDM events provided"));
        assert!(client.session().calls().is_empty());
    }

    #[tokio::test]
    async fn test_existing_fields_kept_and_ids_optional() {
        let session = FakeSession::new().respond(SessionResponse::new(
            200,
            "https://chronicle.test",
            "",
        ));
        let client = client(session);
        let event = json!({"metadata": {"event_timestamp": "2025-01-01T00:00:00Z"}});

        let response = client.ingest_udm(&event, false).await.unwrap();

        assert_eq!(response, IngestResponse::Json(json!({})));
        let body = client.session().calls()[0].body.clone().unwrap();
        assert_eq!(
            body,
            json!({"inline_source": {"events": [
                {"udm": {"metadata": {"event_timestamp": "2025-01-01T00:00:00Z"}}}
            ]}})
        );
    }

    #[tokio::test]
    async fn test_redirect_status_is_success() {
        let session = FakeSession::new().respond(SessionResponse::new(
            302,
            "https://chronicle.test",
            "moved",
        ));
        let client = client(session);

        let response = client
            .ingest_udm(json!({"metadata": {}}), true)
            .await
            .unwrap();

        assert_eq!(response, IngestResponse::RawText("moved".to_string()));
    }
}
