//! Raw log ingestion for [`ChronicleClient`].
//!
//! # What this module handles:
//! - Log type validation against [`crate::log_types`]
//! - Timestamp defaulting, ordering checks and formatting
//! - Default forwarder resolution when no forwarder is given
//! - Base64 encoding of messages and the import payload
//!
//! # Invariants
//! - Every validation failure is returned before the first request is sent

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::client::ChronicleClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::format::format_log_timestamp;
use crate::forwarder_id::{extract_forwarder_id, forwarder_resource_name};
use crate::log_types::is_valid_log_type;
use crate::models::IngestLogParams;
use crate::models::ingest::{InlineLogSource, LogEntry, LogImportRequest, LogLabel};
use crate::session::Session;

impl<S: Session> ChronicleClient<S> {
    /// Ingest one or more raw log messages of a single log type.
    ///
    /// Missing timestamps default to the same "now". Without a forwarder ID
    /// the default forwarder is resolved (and created if needed) first.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidArgument`] for an unknown log type (unless
    ///   `force_log_type` is set) or a collection time before the entry time
    /// - [`ClientError::ApiError`] ("Failed to ingest log") if the import does
    ///   not return 200, or any error from default forwarder resolution
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use secops_client::models::IngestLogParams;
    ///
    /// let operation = client
    ///     .ingest_log(IngestLogParams::new("OKTA", raw_json).with_namespace("corp"))
    ///     .await?;
    /// ```
    pub async fn ingest_log(&self, params: IngestLogParams) -> Result<Value> {
        let IngestLogParams {
            log_type,
            messages,
            entry_time,
            collection_time,
            namespace,
            labels,
            forwarder_id,
            force_log_type,
        } = params;

        if !force_log_type && !is_valid_log_type(&log_type) {
            return Err(ClientError::InvalidArgument(format!(
                "Invalid log type: {log_type}. Use force_log_type to override."
            )));
        }

        let now = Utc::now();
        let entry_time = entry_time.unwrap_or(now);
        let collection_time = collection_time.unwrap_or(now);
        if collection_time < entry_time {
            return Err(ClientError::InvalidArgument(
                "Collection time must be same or after log entry time".to_string(),
            ));
        }
        let log_entry_time = format_log_timestamp(&entry_time);
        let collection_time = format_log_timestamp(&collection_time);

        let forwarder_id = match forwarder_id {
            Some(id) => id,
            None => {
                let forwarder = self.get_or_create_forwarder(None).await?;
                extract_forwarder_id(&forwarder.name)?.to_string()
            }
        };
        let forwarder = forwarder_resource_name(&self.instance_id, &forwarder_id);

        let environment_namespace = namespace.filter(|ns| !ns.is_empty());
        let labels: Option<BTreeMap<String, LogLabel>> = (!labels.is_empty()).then(|| {
            labels
                .into_iter()
                .map(|(key, value)| (key, LogLabel { value }))
                .collect()
        });

        let logs: Vec<LogEntry> = messages
            .into_vec()
            .into_iter()
            .map(|message| LogEntry {
                data: STANDARD.encode(message.as_bytes()),
                log_entry_time: log_entry_time.clone(),
                collection_time: collection_time.clone(),
                environment_namespace: environment_namespace.clone(),
                labels: labels.clone(),
            })
            .collect();

        debug!(
            log_type = %log_type,
            count = logs.len(),
            forwarder = %forwarder,
            "Ingesting logs"
        );

        let request = LogImportRequest {
            inline_source: InlineLogSource { logs, forwarder },
        };
        endpoints::import_logs(
            &self.session,
            &self.base_url,
            &self.instance_id,
            &log_type,
            &request,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionResponse;
    use crate::testing::FakeSession;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    const INSTANCE: &str = "projects/p/locations/us/instances/c";

    fn client(session: FakeSession) -> ChronicleClient<FakeSession> {
        ChronicleClient::with_session(
            session,
            "https://chronicle.test/v1alpha",
            INSTANCE,
            "Wrapper-SDK-Forwarder",
        )
    }

    #[tokio::test]
    async fn test_collection_before_entry_sends_nothing() {
        let client = client(FakeSession::new());
        let entry = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();

        let err = client
            .ingest_log(
                IngestLogParams::new("OKTA", "x")
                    .with_forwarder_id("f-1")
                    .with_entry_time(entry)
                    .with_collection_time(entry - Duration::seconds(1)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument(_)));
        assert!(client.session().calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_log_type_rejected_before_forwarder_lookup() {
        let client = client(FakeSession::new());

        let err = client
            .ingest_log(IngestLogParams::new("NOT_A_REAL_TYPE", "x"))
            .await
            .unwrap_err();

        match err {
            ClientError::InvalidArgument(msg) => assert!(msg.contains("NOT_A_REAL_TYPE")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(client.session().calls().is_empty());
    }

    #[tokio::test]
    async fn test_payload_shape_for_batch() {
        let session = FakeSession::new().respond(SessionResponse::new(
            200,
            "https://chronicle.test",
            r#"{"operation":"op-1"}"#,
        ));
        let client = client(session);
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();

        let result = client
            .ingest_log(
                IngestLogParams::new("WINEVTLOG", vec!["hello", "wörld"])
                    .with_forwarder_id("f-9")
                    .with_entry_time(ts)
                    .with_collection_time(ts)
                    .with_namespace("corp")
                    .with_label("env", "prod"),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"operation": "op-1"}));
        let calls = client.session().calls();
        assert_eq!(
            calls[0].url,
            format!("https://chronicle.test/v1alpha/{INSTANCE}/logTypes/WINEVTLOG/logs:import")
        );
        let entry = json!({
            "log_entry_time": "2025-06-01T08:00:00.000000Z",
            "collection_time": "2025-06-01T08:00:00.000000Z",
            "environment_namespace": "corp",
            "labels": {"env": {"value": "prod"}},
        });
        let mut first = entry.clone();
        first["data"] = json!("aGVsbG8=");
        let mut second = entry;
        second["data"] = json!("d8O2cmxk");
        assert_eq!(
            calls[0].body.as_ref().unwrap(),
            &json!({"inline_source": {
                "logs": [first, second],
                "forwarder": format!("{INSTANCE}/forwarders/f-9"),
            }})
        );
    }

    #[tokio::test]
    async fn test_empty_namespace_and_labels_omitted() {
        let session = FakeSession::new().respond(SessionResponse::new(
            200,
            "https://chronicle.test",
            "{}",
        ));
        let client = client(session);

        client
            .ingest_log(
                IngestLogParams::new("OKTA", "x")
                    .with_forwarder_id("f-1")
                    .with_namespace(""),
            )
            .await
            .unwrap();

        let body = client.session().calls()[0].body.clone().unwrap();
        let log = &body["inline_source"]["logs"][0];
        assert!(log.get("environment_namespace").is_none());
        assert!(log.get("labels").is_none());
        assert_eq!(log["log_entry_time"], log["collection_time"]);
    }
}
