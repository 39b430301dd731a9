use crate::error::{Result, VortexError};
use crate::format::OutputFormat;
use crate::release::{ReleasedConfig, RenderedResponse};

/// Serializa las configuraciones como un objeto JSON plano.
pub fn render(config: &ReleasedConfig) -> Result<RenderedResponse> {
    let body = serde_json::to_string(&config.configurations)
        .map_err(|e| VortexError::render(OutputFormat::Json.as_str(), e.to_string()))?;

    Ok(RenderedResponse::new(
        body,
        OutputFormat::Json.rendered_content_type(),
        OutputFormat::Json,
    ))
}
