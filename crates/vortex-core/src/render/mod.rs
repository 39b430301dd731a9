//! Rendering of released configuration.
//!
//! Turns a [`ReleasedConfig`] into the body a client receives:
//! - Properties (`key=value` lines)
//! - JSON (flat object)
//! - Raw (namespace content as stored, with a content type derived from
//!   the namespace extension)

pub mod json;
pub mod properties;
pub mod raw;

use crate::error::Result;
use crate::format::OutputFormat;
use crate::release::{ReleasedConfig, RenderedResponse};

/// Renders the release in the requested format.
///
/// # Example
///
/// ```
/// use vortex_core::{OutputFormat, ReleasedConfig, render};
///
/// let release = ReleasedConfig::new("app", "default", "application", "r1")
///     .with_entry("timeout", "100");
///
/// let response = render(&release, OutputFormat::Properties).unwrap();
/// assert_eq!(response.body, "timeout=100\n");
/// ```
pub fn render(config: &ReleasedConfig, format: OutputFormat) -> Result<RenderedResponse> {
    match format {
        OutputFormat::Properties => Ok(properties::render(config)),
        OutputFormat::Json => json::render(config),
        OutputFormat::Raw => Ok(raw::render(config)),
    }
}
