//! Testing utilities for SecOps client tests.
//!
//! This module provides helper functions for loading test fixtures and a
//! scripted [`Session`] for exercising client logic without HTTP.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use secops_client::testing::{FakeSession, load_fixture};
//!
//! let page = load_fixture("forwarders/list_page_1.json");
//! let session = FakeSession::new().respond_json(200, &page);
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::session::{Session, SessionResponse};

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "forwarders/forwarder.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A request observed by [`FakeSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// JSON body for POST requests.
    pub body: Option<Value>,
}

/// [`Session`] that replays scripted responses in order and records every call.
///
/// Running out of scripted responses is an error, so unexpected extra
/// requests fail the test instead of hanging.
#[derive(Debug, Default)]
pub struct FakeSession {
    responses: Mutex<VecDeque<SessionResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(self, response: SessionResponse) -> Self {
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .push_back(response);
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(self, status: u16, body: &Value) -> Self {
        self.respond(SessionResponse::new(status, "https://fake.session", body.to_string()))
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    fn next(&self, call: RecordedCall) -> Result<SessionResponse> {
        let description = format!("{} {}", call.method, call.url);
        self.calls.lock().expect("calls lock poisoned").push(call);
        self.responses
            .lock()
            .expect("responses lock poisoned")
            .pop_front()
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!("no scripted response for {description}"))
            })
    }
}

impl Session for FakeSession {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<SessionResponse> {
        self.next(RecordedCall {
            method: "GET",
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            body: None,
        })
    }

    async fn post<B>(&self, url: &str, body: &B) -> Result<SessionResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidArgument(format!("unserializable body: {e}")))?;
        self.next(RecordedCall {
            method: "POST",
            url: url.to_string(),
            query: Vec::new(),
            body: Some(body),
        })
    }
}
