//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the SecOps client against a wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Test clients point at `{mock_server}/v1alpha` with a fixed test instance

use std::time::Duration;

use secrecy::SecretString;

#[allow(unused_imports)]
pub use secops_client::testing::load_fixture;

#[allow(unused_imports)]
pub use secops_client::{
    AuthStrategy, ChronicleClient, ClientError, CreateForwarderParams, IngestLogParams,
    IngestResponse,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROJECT_ID: &str = "test-project";
pub const CUSTOMER_ID: &str = "test-customer";
pub const INSTANCE_ID: &str = "projects/test-project/locations/us/instances/test-customer";
pub const DEFAULT_FORWARDER: &str = "Wrapper-SDK-Forwarder";

/// Path of the forwarders collection on the mock server.
#[allow(dead_code)]
pub fn forwarders_path() -> String {
    format!("/v1alpha/{INSTANCE_ID}/forwarders")
}

/// Fully-qualified resource name of a forwarder in the test instance.
#[allow(dead_code)]
pub fn forwarder_name(id: &str) -> String {
    format!("{INSTANCE_ID}/forwarders/{id}")
}

/// Build a client against the mock server with retries disabled.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> ChronicleClient {
    test_client_with_retries(server, 0)
}

/// Build a client against the mock server with the given 429 retry budget.
#[allow(dead_code)]
pub fn test_client_with_retries(server: &MockServer, max_retries: usize) -> ChronicleClient {
    ChronicleClient::builder()
        .base_url(format!("{}/v1alpha", server.uri()))
        .project_id(PROJECT_ID)
        .customer_id(CUSTOMER_ID)
        .auth_strategy(AuthStrategy::AccessToken {
            token: SecretString::new("test-token".to_string().into()),
            ttl_seconds: None,
        })
        .timeout(Duration::from_secs(5))
        .max_retries(max_retries)
        .build()
        .expect("test client should build")
}
