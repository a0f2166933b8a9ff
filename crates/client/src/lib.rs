//! Chronicle (Google SecOps) REST API client.
//!
//! This crate provides a type-safe client for managing Chronicle forwarders
//! and ingesting raw logs and UDM events. Requests are authorized with a
//! caller-supplied OAuth access token.

mod auth;
pub mod client;
pub mod error;
pub mod format;
pub mod forwarder_id;
pub mod log_types;
pub mod metrics;
pub mod models;
pub mod session;

pub mod endpoints;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::{AuthStrategy, SessionManager};
pub use client::ChronicleClient;
pub use client::builder::ChronicleClientBuilder;
pub use error::{ClientError, Result};
pub use forwarder_id::{extract_forwarder_id, forwarder_resource_name};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    CreateForwarderParams, Forwarder, ForwarderListResponse, ForwarderMetadata, IngestLogParams,
    IngestResponse, LogMessages, UdmEvents,
};
pub use session::{AuthorizedSession, Session, SessionResponse};
