//! Forwarder directory methods for [`ChronicleClient`].
//!
//! # What this module handles:
//! - Listing forwarders across every page
//! - Finding a forwarder by display name
//! - Creating and fetching forwarders
//! - Resolving the default forwarder through the per-client ID cache
//!
//! # What this module does NOT handle:
//! - Low-level forwarder endpoint HTTP calls (in [`crate::endpoints`])
//! - Updating or deleting forwarders

use secops_config::constants::MAX_FORWARDER_PAGE_SIZE;
use tracing::{debug, info, warn};

use crate::client::ChronicleClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{CreateForwarderParams, Forwarder, ForwarderListResponse};
use crate::session::Session;

impl<S: Session> ChronicleClient<S> {
    /// List forwarders, following `nextPageToken` until the last page.
    ///
    /// `page_size` is clamped to `1..=1000`. Listing starts at `page_token`
    /// when given. The returned response holds every forwarder from every
    /// page fetched and never carries a `next_page_token`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::ApiError`] if any page request does not return 200.
    pub async fn list_forwarders(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ForwarderListResponse> {
        let page_size = page_size.clamp(1, MAX_FORWARDER_PAGE_SIZE);
        let mut token = page_token.map(str::to_string);
        let mut forwarders = Vec::new();
        let mut page = 0usize;

        loop {
            page += 1;
            debug!(page, page_size, "Listing forwarders");
            let response = endpoints::list_forwarders_page(
                &self.session,
                &self.base_url,
                &self.instance_id,
                page_size,
                token.as_deref(),
            )
            .await?;

            forwarders.extend(response.forwarders);
            match response.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(ForwarderListResponse {
            forwarders,
            next_page_token: None,
        })
    }

    /// Find a forwarder whose display name is exactly `display_name`.
    ///
    /// Returns the first match in listing order, or `None`.
    ///
    /// # Errors
    ///
    /// Listing failures are returned with the searched name added to the
    /// message; the status code is kept.
    pub async fn find_forwarder_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<Forwarder>> {
        let listing = self
            .list_forwarders(MAX_FORWARDER_PAGE_SIZE, None)
            .await
            .map_err(|e| {
                e.with_api_context(|message| {
                    format!(
                        "Failed to list forwarders while searching for '{display_name}': {message}"
                    )
                })
            })?;

        Ok(listing
            .forwarders
            .into_iter()
            .find(|f| f.has_display_name(display_name)))
    }

    /// Create a forwarder.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::ApiError`] if the API does not return 200.
    pub async fn create_forwarder(&self, params: CreateForwarderParams) -> Result<Forwarder> {
        let forwarder = endpoints::create_forwarder(
            &self.session,
            &self.base_url,
            &self.instance_id,
            &params,
        )
        .await?;
        info!(
            forwarder = %forwarder.name,
            display_name = %params.display_name,
            "Created forwarder"
        );
        Ok(forwarder)
    }

    /// Get a forwarder by its short ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::ApiError`] if the API does not return 200,
    /// including when the forwarder does not exist.
    pub async fn get_forwarder(&self, forwarder_id: &str) -> Result<Forwarder> {
        endpoints::get_forwarder(
            &self.session,
            &self.base_url,
            &self.instance_id,
            forwarder_id,
        )
        .await
    }

    /// Return the forwarder named `display_name`, creating it if none exists.
    ///
    /// `None` or an empty name resolves the client's default forwarder. Only
    /// the default forwarder's ID is cached; a cached ID is always re-fetched
    /// and its display name checked before it is trusted.
    ///
    /// # Errors
    ///
    /// API errors whose message mentions permissions are returned as
    /// "Insufficient permissions to manage forwarders: ..." with the original
    /// status. Other errors from the lookup or create pass through unchanged.
    pub async fn get_or_create_forwarder(&self, display_name: Option<&str>) -> Result<Forwarder> {
        let target = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_forwarder_name.as_str());
        let is_default = target == self.default_forwarder_name;

        if is_default && let Some(cached) = self.cached_default_forwarder().await {
            return Ok(cached);
        }

        self.find_or_create_forwarder(target, is_default)
            .await
            .map_err(|e| {
                if e.is_permission_denied() {
                    e.with_api_context(|message| {
                        format!("Insufficient permissions to manage forwarders: {message}")
                    })
                } else {
                    e
                }
            })
    }

    /// Fetch the cached default forwarder, clearing the cache if it is gone or renamed.
    async fn cached_default_forwarder(&self) -> Option<Forwarder> {
        let forwarder_id = self.forwarder_cache.get()?;

        match self.get_forwarder(&forwarder_id).await {
            Ok(forwarder) if forwarder.has_display_name(&self.default_forwarder_name) => {
                debug!(forwarder_id = %forwarder_id, "Default forwarder cache hit");
                Some(forwarder)
            }
            Ok(forwarder) => {
                warn!(
                    forwarder_id = %forwarder_id,
                    display_name = ?forwarder.display_name,
                    "Cached default forwarder was renamed, invalidating cache"
                );
                self.forwarder_cache.clear();
                None
            }
            Err(e) => {
                warn!(
                    forwarder_id = %forwarder_id,
                    error = %e,
                    "Cached default forwarder lookup failed, invalidating cache"
                );
                self.forwarder_cache.clear();
                None
            }
        }
    }

    async fn find_or_create_forwarder(&self, target: &str, is_default: bool) -> Result<Forwarder> {
        let forwarder = match self.find_forwarder_by_display_name(target).await? {
            Some(found) => {
                debug!(display_name = %target, forwarder = %found.name, "Found existing forwarder");
                found
            }
            None => {
                debug!(display_name = %target, "No forwarder found, creating one");
                self.create_forwarder(CreateForwarderParams::new(target))
                    .await?
            }
        };

        if is_default {
            self.forwarder_cache.set(forwarder.id()?);
        }
        Ok(forwarder)
    }
}
