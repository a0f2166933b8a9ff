//! Main Chronicle API client and API methods.
//!
//! This module provides the primary [`ChronicleClient`] for forwarder
//! management and log/UDM ingestion against a single Chronicle instance.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `forwarder_cache`: Default forwarder ID cache
//! - `forwarders`: Forwarder directory methods
//! - `ingest`: Raw log ingestion
//! - `udm`: UDM event ingestion
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Bearer token storage and 429 backoff (delegated to [`crate::session::AuthorizedSession`])
//!
//! # Invariants
//! - Requests are issued one at a time; no method spawns tasks
//! - The forwarder cache belongs to one client and is never shared globally

pub mod builder;
mod forwarder_cache;

// API method submodules
mod forwarders;
mod ingest;
mod udm;

pub use forwarder_cache::ForwarderCache;

use secrecy::SecretString;

use crate::session::{AuthorizedSession, Session};

/// Chronicle REST API client.
///
/// Generic over the [`Session`] it sends requests through; the default is the
/// reqwest-backed [`AuthorizedSession`].
///
/// # Creating a Client
///
/// ```rust,ignore
/// use secops_client::{AuthStrategy, ChronicleClient};
/// use secrecy::SecretString;
///
/// let client = ChronicleClient::builder()
///     .project_id("my-project")
///     .customer_id("c-123")
///     .region("us")
///     .auth_strategy(AuthStrategy::AccessToken {
///         token: SecretString::new("ya29....".to_string().into()),
///         ttl_seconds: None,
///     })
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ChronicleClient<S = AuthorizedSession> {
    pub(crate) session: S,
    pub(crate) base_url: String,
    pub(crate) instance_id: String,
    pub(crate) default_forwarder_name: String,
    pub(crate) forwarder_cache: ForwarderCache,
}

impl ChronicleClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ChronicleClientBuilder {
        builder::ChronicleClientBuilder::new()
    }

    /// Replace the bearer token, e.g. after the caller refreshed it.
    pub fn set_access_token(&mut self, token: SecretString, ttl_seconds: Option<u64>) {
        self.session.set_access_token(token, ttl_seconds);
    }

    /// Check if the current access token is expired.
    pub fn is_token_expired(&self) -> bool {
        self.session.is_token_expired()
    }
}

impl<S: Session> ChronicleClient<S> {
    /// Create a client over an existing session.
    ///
    /// `base_url` must not carry a trailing slash; `instance_id` is the
    /// relative instance resource name.
    pub fn with_session(
        session: S,
        base_url: impl Into<String>,
        instance_id: impl Into<String>,
        default_forwarder_name: impl Into<String>,
    ) -> Self {
        Self {
            session,
            base_url: base_url.into(),
            instance_id: instance_id.into(),
            default_forwarder_name: default_forwarder_name.into(),
            forwarder_cache: ForwarderCache::new(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the instance resource name, `projects/P/locations/R/instances/C`.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Display name resolved by `get_or_create_forwarder(None)`.
    pub fn default_forwarder_name(&self) -> &str {
        &self.default_forwarder_name
    }

    /// The currently cached default forwarder ID.
    pub fn cached_default_forwarder_id(&self) -> Option<String> {
        self.forwarder_cache.get()
    }

    /// The underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }
}
