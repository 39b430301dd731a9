#![allow(dead_code)]
use vortex_core::{ConfigCoordinate, ReleasedConfig, WatchKeys};

/// Helper to create a coordinate. Panics on invalid input (intended for tests).
pub fn coordinate(app_id: &str, cluster: &str, namespace: &str) -> ConfigCoordinate {
    ConfigCoordinate::new(app_id, cluster, namespace).expect("Failed to create test coordinate")
}

/// Returns a release of `application` with a handful of entries.
pub fn application_release() -> ReleasedConfig {
    ReleasedConfig::new("payment", "default", "application", "20260101-abc")
        .with_entry("server.port", "8080")
        .with_entry("db.url", "jdbc:postgres://local:5432/pay")
        .with_entry("greeting", "hello world")
        .with_watch_keys(WatchKeys::assemble("payment", "default", "application", None))
}

/// Returns a release of a non-properties namespace holding `content`.
pub fn file_release(namespace: &str, content: &str) -> ReleasedConfig {
    ReleasedConfig::new("payment", "default", namespace, "20260101-def")
        .with_entry("content", content)
}
