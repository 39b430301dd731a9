//! Collaborator trait definitions.

use async_trait::async_trait;
use vortex_core::{ClientIdentity, ConfigCoordinate, ReleasedConfig, Result};

/// Computes the current configuration for a coordinate.
///
/// This is the slow path behind the cache: it reads persisted releases,
/// merges them and reports the watch keys the result depends on. It must
/// be idempotent for a given coordinate at a given release version.
///
/// # Example
///
/// ```ignore
/// use vortex_cache::ConfigQueryEngine;
///
/// struct ReleaseStore;
///
/// #[async_trait]
/// impl ConfigQueryEngine for ReleaseStore {
///     async fn query_config(
///         &self,
///         coordinate: &ConfigCoordinate,
///         client: &ClientIdentity,
///     ) -> Result<ReleasedConfig> {
///         // Load latest release, merge public namespaces...
///     }
///
///     fn name(&self) -> &str {
///         "release-store"
///     }
/// }
/// ```
#[async_trait]
pub trait ConfigQueryEngine: Send + Sync {
    /// Fetches the configuration for `coordinate` as seen by `client`.
    ///
    /// # Errors
    ///
    /// - `VortexError::ConfigNotFound` if there is no release
    /// - `VortexError::SourceUnavailable` / `VortexError::Timeout` if the
    ///   release store could not be read
    async fn query_config(
        &self,
        coordinate: &ConfigCoordinate,
        client: &ClientIdentity,
    ) -> Result<ReleasedConfig>;

    /// Returns the name of this engine, for logging.
    fn name(&self) -> &str;
}

/// Decides whether a client gets a gray (targeted) release.
///
/// Consulted before every cache read or write: a client under a gray rule
/// must never read the shared response nor write its own into the cache.
pub trait GrayReleaseRules: Send + Sync {
    fn has_override(
        &self,
        app_id: &str,
        client_ip: Option<&str>,
        client_label: Option<&str>,
        namespace: &str,
    ) -> bool;
}

/// Rules for deployments without gray releases.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrayReleaseRules;

impl GrayReleaseRules for NoGrayReleaseRules {
    fn has_override(
        &self,
        _app_id: &str,
        _client_ip: Option<&str>,
        _client_label: Option<&str>,
        _namespace: &str,
    ) -> bool {
        false
    }
}
