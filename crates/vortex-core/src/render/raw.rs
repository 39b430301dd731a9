use crate::format::{ConfigFileFormat, OutputFormat};
use crate::release::{ReleasedConfig, RenderedResponse};

/// Key holding the file content of non-properties namespaces.
pub const CONTENT_KEY: &str = "content";

/// Serves the namespace as stored.
///
/// Properties namespaces have no single content blob, so they render as
/// properties. Every other file format returns the `content` entry as is.
pub fn render(config: &ReleasedConfig) -> RenderedResponse {
    let file_format = ConfigFileFormat::from_namespace(&config.namespace_name);

    let body = if file_format.is_properties() {
        super::properties::to_properties_string(config)
    } else {
        config
            .configurations
            .get(CONTENT_KEY)
            .cloned()
            .unwrap_or_default()
    };

    RenderedResponse::new(body, file_format.content_type(), OutputFormat::Raw)
}
