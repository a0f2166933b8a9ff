//! REST API endpoint implementations.
//!
//! Each function issues exactly one request through a [`crate::session::Session`]
//! and applies that endpoint's success check.

mod forwarders;
mod ingest;
pub mod url_encoding;

pub use forwarders::{create_forwarder, get_forwarder, list_forwarders_page};
pub(crate) use ingest::{import_logs, import_udm_events};
