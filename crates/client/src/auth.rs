//! Authentication strategies and access token management.

use secops_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use secrecy::{ExposeSecret, SecretString};
use std::time::{Duration, Instant};

use crate::error::{ClientError, Result};

/// Strategy for authenticating with the Chronicle API.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Pre-minted OAuth 2.0 access token.
    ///
    /// `ttl_seconds` is the remaining lifetime of the token; `None` means the
    /// token is never treated as expired by the client.
    AccessToken {
        token: SecretString,
        ttl_seconds: Option<u64>,
    },
}

/// Access token with expiry information.
#[derive(Debug, Clone)]
struct AccessToken {
    value: SecretString,
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn new(value: SecretString, ttl_seconds: Option<u64>) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
        }
    }

    /// Check if the token expires within `buffer`.
    ///
    /// Tokens this close to expiry are refused so a request never leaves with
    /// a token that lapses in flight.
    fn expires_within(&self, buffer: Duration) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()) <= buffer)
            .unwrap_or(false)
    }
}

/// Holds the bearer token used by [`crate::session::AuthorizedSession`].
#[derive(Debug)]
pub struct SessionManager {
    token: AccessToken,
    expiry_buffer: Duration,
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self::with_expiry_buffer(strategy, DEFAULT_EXPIRY_BUFFER_SECS)
    }

    /// Create a session manager with a custom expiry buffer in seconds.
    pub fn with_expiry_buffer(strategy: AuthStrategy, expiry_buffer_seconds: u64) -> Self {
        let AuthStrategy::AccessToken { token, ttl_seconds } = strategy;
        Self {
            token: AccessToken::new(token, ttl_seconds),
            expiry_buffer: Duration::from_secs(expiry_buffer_seconds),
        }
    }

    /// Get the bearer token for API requests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::SessionExpired`] if the token is expired or
    /// expires within the buffer window.
    pub fn bearer_token(&self) -> Result<&str> {
        if self.is_expired() {
            return Err(ClientError::SessionExpired);
        }
        Ok(self.token.value.expose_secret())
    }

    /// Check if the token is expired or will expire within the buffer.
    pub fn is_expired(&self) -> bool {
        self.token.expires_within(self.expiry_buffer)
    }

    /// Replace the access token (e.g. after the caller refreshed it).
    pub fn set_access_token(&mut self, token: SecretString, ttl_seconds: Option<u64>) {
        self.token = AccessToken::new(token, ttl_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(token: &str, ttl_seconds: Option<u64>) -> AuthStrategy {
        AuthStrategy::AccessToken {
            token: SecretString::new(token.to_string().into()),
            ttl_seconds,
        }
    }

    #[test]
    fn test_token_without_ttl_never_expires() {
        let manager = SessionManager::new(strategy("ya29.token", None));
        assert!(!manager.is_expired());
        assert_eq!(manager.bearer_token().unwrap(), "ya29.token");
    }

    #[test]
    fn test_token_with_long_ttl_is_valid() {
        let manager = SessionManager::new(strategy("ya29.token", Some(3600)));
        assert!(!manager.is_expired());
        assert!(manager.bearer_token().is_ok());
    }

    #[test]
    fn test_token_inside_buffer_is_expired() {
        // 30s left but the default buffer is 60s.
        let manager = SessionManager::new(strategy("ya29.token", Some(30)));
        assert!(manager.is_expired());
        assert!(matches!(
            manager.bearer_token(),
            Err(ClientError::SessionExpired)
        ));
    }

    #[test]
    fn test_zero_buffer_uses_exact_expiry() {
        let manager = SessionManager::with_expiry_buffer(strategy("t", Some(30)), 0);
        assert!(!manager.is_expired());
    }

    #[test]
    fn test_set_access_token_replaces_expired_token() {
        let mut manager = SessionManager::new(strategy("old", Some(0)));
        assert!(manager.is_expired());

        manager.set_access_token(SecretString::new("new".to_string().into()), None);
        assert_eq!(manager.bearer_token().unwrap(), "new");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let manager = SessionManager::new(strategy("super-secret-token", None));
        let debug = format!("{manager:?}");
        assert!(!debug.contains("super-secret-token"));
    }
}
