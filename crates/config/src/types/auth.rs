//! Authentication types for SecOps client configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (pre-minted OAuth access token).
//! - Handle serialization of secret values.
//!
//! Does NOT handle:
//! - Minting or refreshing OAuth tokens (service account parsing, metadata
//!   server discovery). Callers hand the client an already-issued token.
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Strategy for authenticating with the Chronicle API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthStrategy {
    /// OAuth 2.0 access token sent as `Authorization: Bearer <token>`.
    ///
    /// `ttl_seconds` is the remaining lifetime of the token at load time;
    /// `None` means the client never treats the token as expired.
    #[serde(rename = "access_token")]
    AccessToken {
        #[serde(with = "secret_string")]
        token: SecretString,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ttl_seconds: Option<u64>,
    },
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub strategy: AuthStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_access_token_round_trips_through_json() {
        let config = AuthConfig {
            strategy: AuthStrategy::AccessToken {
                token: SecretString::new("ya29.token".to_string().into()),
                ttl_seconds: Some(3599),
            },
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["strategy"]["type"], "access_token");
        assert_eq!(json["strategy"]["ttl_seconds"], 3599);

        let parsed: AuthConfig = serde_json::from_value(json).unwrap();
        let AuthStrategy::AccessToken { token, ttl_seconds } = parsed.strategy;
        assert_eq!(token.expose_secret(), "ya29.token");
        assert_eq!(ttl_seconds, Some(3599));
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let strategy = AuthStrategy::AccessToken {
            token: SecretString::new("super-secret".to_string().into()),
            ttl_seconds: None,
        };

        let debug = format!("{strategy:?}");
        assert!(!debug.contains("super-secret"));
    }
}
