//! Data models for Chronicle API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod forwarders;
pub mod ingest;

pub use forwarders::{
    CreateForwarderParams, Forwarder, ForwarderConfig, ForwarderLabel, ForwarderListResponse,
    ForwarderMetadata, HttpSettings, ServerSettings,
};
pub use ingest::{IngestLogParams, IngestResponse, LogMessages, UdmEvents};
