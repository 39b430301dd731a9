//! Error types for the config file cache.

use std::sync::Arc;

use thiserror::Error;
use vortex_core::VortexError;

/// Error del sistema de cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The query engine failed, or its result could not be rendered.
    /// Nothing was cached or indexed for the attempt.
    #[error("failed to fetch config: {0}")]
    Query(#[source] Arc<VortexError>),

    /// Settings could not be loaded.
    #[error("failed to load cache settings: {0}")]
    Settings(#[from] config::ConfigError),

    /// Settings were loaded but are not usable.
    #[error("invalid cache setting '{field}': {reason}")]
    InvalidSettings { field: String, reason: String },
}

impl CacheError {
    pub(crate) fn invalid_settings(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The query error behind this failure, if any.
    pub fn query_error(&self) -> Option<&VortexError> {
        match self {
            Self::Query(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Returns true if retrying the query might succeed.
    pub fn is_transient(&self) -> bool {
        self.query_error().is_some_and(VortexError::is_transient)
    }
}

impl From<VortexError> for CacheError {
    fn from(err: VortexError) -> Self {
        Self::Query(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = CacheError::from(VortexError::unavailable("release-db", "connection refused"));

        assert!(err.to_string().starts_with("failed to fetch config:"));
        assert!(err.to_string().contains("connection refused"));
        assert!(err.is_transient());
    }

    #[test]
    fn test_not_found_is_not_transient() {
        let err = CacheError::from(VortexError::config_not_found("app", "default", "ns"));

        assert!(!err.is_transient());
        assert!(err.query_error().is_some_and(VortexError::is_not_found));
    }

    #[test]
    fn test_invalid_settings_display() {
        let err = CacheError::invalid_settings("ttl_seconds", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid cache setting 'ttl_seconds': must be greater than zero"
        );
        assert!(err.query_error().is_none());
    }
}
