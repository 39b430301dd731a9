mod common;

use common::coordinate;
use vortex_core::{ConfigCoordinate, Result, VortexError, WatchKeys};

#[test]
fn test_validation_workflow() {
    fn resolve(app_id: &str, namespace: &str) -> Result<String> {
        let coordinate = ConfigCoordinate::new(app_id, "default", namespace)?;
        Ok(format!("Resolved: {}", coordinate))
    }

    // Valid case
    assert_eq!(
        resolve("payment", "application.properties").unwrap(),
        "Resolved: payment/default/application"
    );

    // Invalid case
    let result = resolve("", "application");
    if let Err(VortexError::InvalidCoordinate { field, reason }) = result {
        assert_eq!(field, "app_id");
        assert!(reason.contains("empty"));
    } else {
        panic!("Expected InvalidCoordinate error");
    }
}

#[test]
fn test_bare_properties_suffix_is_rejected() {
    let err = ConfigCoordinate::new("payment", "default", ".properties").unwrap_err();
    assert!(matches!(err, VortexError::InvalidCoordinate { ref field, .. } if field == "namespace"));
}

#[test]
fn test_watch_keys_for_data_center_client() {
    let coordinate = coordinate("payment", "sh-a", "datasource").with_data_center("sh");

    let keys: Vec<_> = WatchKeys::for_coordinate(&coordinate).into_iter().collect();

    assert_eq!(
        keys,
        vec![
            "payment+default+datasource",
            "payment+sh+datasource",
            "payment+sh-a+datasource",
        ]
    );
}

#[test]
fn test_watch_keys_keep_case() {
    let coordinate = coordinate("Payment", "Default", "Application");
    let keys = WatchKeys::for_coordinate(&coordinate);

    // "Default" no es el cluster default, asi que se agrega el default
    assert!(keys.contains("Payment+Default+Application"));
    assert!(keys.contains("Payment+default+Application"));
}

#[test]
fn test_error_classification() {
    let not_found = VortexError::config_not_found("payment", "default", "application");
    let down = VortexError::unavailable("release-db", "connection reset");
    let internal = VortexError::internal("unexpected state");

    assert!(not_found.is_not_found());
    assert!(!not_found.is_transient());
    assert!(down.is_transient());
    assert!(!internal.is_transient());
    assert!(down.to_string().contains("release-db"));
}
