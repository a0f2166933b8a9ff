//! Builder tests that do not touch the process environment.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::AuthStrategy;
use secrecy::ExposeSecret;
use std::time::Duration;

fn minimal_loader() -> ConfigLoader {
    ConfigLoader::new()
        .with_project_id("my-project".to_string())
        .with_customer_id("c-123".to_string())
        .with_access_token("ya29.token".to_string())
}

#[test]
fn test_defaults_applied() {
    let config = minimal_loader().build().unwrap();

    assert_eq!(
        config.connection.base_url,
        "https://us-chronicle.googleapis.com/v1alpha"
    );
    assert_eq!(config.connection.timeout, Duration::from_secs(30));
    assert_eq!(config.connection.max_retries, 3);
    assert!(!config.connection.skip_verify);
    assert_eq!(config.instance.region, "us");
    assert_eq!(config.instance.default_forwarder_name, "Wrapper-SDK-Forwarder");
    assert_eq!(
        config.instance.instance_id(),
        "projects/my-project/locations/us/instances/c-123"
    );
}

#[test]
fn test_region_drives_base_url() {
    let config = minimal_loader()
        .with_region("europe".to_string())
        .build()
        .unwrap();

    assert_eq!(
        config.connection.base_url,
        "https://europe-chronicle.googleapis.com/v1alpha"
    );
    assert_eq!(
        config.instance.instance_id(),
        "projects/my-project/locations/europe/instances/c-123"
    );
}

#[test]
fn test_explicit_base_url_normalized() {
    let config = minimal_loader()
        .with_base_url("http://127.0.0.1:8080/v1alpha/".to_string())
        .build()
        .unwrap();

    assert_eq!(config.connection.base_url, "http://127.0.0.1:8080/v1alpha");
}

#[test]
fn test_access_token_and_ttl_carried() {
    let config = minimal_loader().with_token_ttl_seconds(1800).build().unwrap();

    let AuthStrategy::AccessToken { token, ttl_seconds } = config.auth.strategy;
    assert_eq!(token.expose_secret(), "ya29.token");
    assert_eq!(ttl_seconds, Some(1800));
}

#[test]
fn test_missing_project_id() {
    let result = ConfigLoader::new()
        .with_customer_id("c".to_string())
        .with_access_token("t".to_string())
        .build();

    assert!(matches!(result, Err(ConfigError::Missing("project_id"))));
}

#[test]
fn test_missing_customer_id() {
    let result = ConfigLoader::new()
        .with_project_id("p".to_string())
        .with_access_token("t".to_string())
        .build();

    assert!(matches!(result, Err(ConfigError::Missing("customer_id"))));
}

#[test]
fn test_missing_access_token() {
    let result = ConfigLoader::new()
        .with_project_id("p".to_string())
        .with_customer_id("c".to_string())
        .build();

    assert!(matches!(result, Err(ConfigError::MissingAuth)));
}

#[test]
fn test_custom_forwarder_name() {
    let config = minimal_loader()
        .with_default_forwarder_name("edge-collector".to_string())
        .build()
        .unwrap();

    assert_eq!(config.instance.default_forwarder_name, "edge-collector");
}
