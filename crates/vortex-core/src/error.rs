//! Error types for Vortex Config.
//!
//! Every fallible operation in the domain layer returns
//! `Result<T, VortexError>`. Query-engine implementations use the same
//! type to report failures, so the cache layer can tell transient
//! failures apart from missing configuration.
//!
//! # Example
//!
//! ```
//! use vortex_core::{Result, VortexError};
//!
//! fn load(app_id: &str) -> Result<String> {
//!     if app_id.is_empty() {
//!         return Err(VortexError::invalid_coordinate("app_id", "cannot be empty"));
//!     }
//!     Ok(format!("config for {}", app_id))
//! }
//!
//! assert!(load("").is_err());
//! ```

use thiserror::Error;

/// Main error type for Vortex Config operations.
#[derive(Debug, Error)]
pub enum VortexError {
    /// No release exists for the requested coordinate.
    #[error(
        "Configuration not found for app '{app_id}', cluster '{cluster}', namespace '{namespace}'"
    )]
    ConfigNotFound {
        /// Application that was requested
        app_id: String,
        /// Cluster that was requested
        cluster: String,
        /// Namespace that was requested
        namespace: String,
    },

    /// The backing release store could not be reached.
    #[error("Source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        /// Name of the store or engine that failed
        source_name: String,
        /// Description of what went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The query engine gave up waiting on the release store.
    #[error("Operation timed out after {seconds}s")]
    Timeout {
        /// Seconds waited before giving up
        seconds: u64,
    },

    /// One of the coordinate components is invalid.
    #[error("Invalid coordinate field '{field}': {reason}")]
    InvalidCoordinate {
        /// Field that failed validation
        field: String,
        /// Why it's invalid
        reason: String,
    },

    /// Release data could not be rendered in the requested format.
    #[error("Failed to render '{format}' response: {message}")]
    Render {
        /// Output format being rendered
        format: String,
        /// Description of the failure
        message: String,
    },

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VortexError {
    /// Creates a ConfigNotFound error.
    pub fn config_not_found(
        app_id: impl Into<String>,
        cluster: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::ConfigNotFound {
            app_id: app_id.into(),
            cluster: cluster.into(),
            namespace: namespace.into(),
        }
    }

    /// Creates a SourceUnavailable error without a cause.
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a SourceUnavailable error with a cause.
    pub fn unavailable_with_cause<E>(
        source_name: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an InvalidCoordinate error.
    pub fn invalid_coordinate(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Render error.
    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this error indicates the config was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }

    /// Returns true if a retry might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. } | Self::Timeout { .. })
    }
}

/// Result type alias using VortexError.
pub type Result<T> = std::result::Result<T, VortexError>;
