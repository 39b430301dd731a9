//! Vortex Core - Domain types
//!
//! This crate provides the types shared by the Vortex config file cache:
//! query coordinates, output formats, released configuration as returned
//! by a query engine, rendering, and watch keys.

pub mod coordinate;
pub mod error;
pub mod format;
pub mod release;
pub mod render;
pub mod watch_keys;

pub use coordinate::{ClientIdentity, ConfigCoordinate, DEFAULT_CLUSTER};
pub use error::{Result, VortexError};
pub use format::{ConfigFileFormat, OutputFormat};
pub use release::{ReleasedConfig, RenderedResponse};
pub use render::render;
pub use watch_keys::{KEY_SEPARATOR, WatchKeys};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
