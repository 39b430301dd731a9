//! Output formats and config-file formats.

use serde::{Deserialize, Serialize};
use std::fmt;

const TEXT_PLAIN: &str = "text/plain;charset=UTF-8";
const APPLICATION_JSON: &str = "application/json;charset=UTF-8";
const APPLICATION_XML: &str = "application/xml;charset=UTF-8";
const APPLICATION_YAML: &str = "application/yaml;charset=UTF-8";

/// Formatos de salida soportados para una respuesta renderizada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` lines.
    Properties,
    /// Flat JSON object.
    Json,
    /// The namespace content as stored (json, yaml, xml, txt files).
    Raw,
}

impl OutputFormat {
    /// Nombre estable usado como prefijo de la cache key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }

    /// Content type for rendered (non-raw) responses.
    pub(crate) fn rendered_content_type(&self) -> &'static str {
        match self {
            Self::Json => APPLICATION_JSON,
            Self::Properties | Self::Raw => TEXT_PLAIN,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File format of a namespace, derived from its extension.
///
/// # Example
///
/// ```
/// use vortex_core::ConfigFileFormat;
///
/// assert_eq!(ConfigFileFormat::from_namespace("datasource.yml"), ConfigFileFormat::Yml);
/// assert_eq!(ConfigFileFormat::from_namespace("application"), ConfigFileFormat::Properties);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFileFormat {
    Properties,
    Xml,
    Json,
    Yml,
    Yaml,
    Txt,
}

impl ConfigFileFormat {
    /// Detects the format from the namespace name. Names without a known
    /// extension are properties namespaces.
    pub fn from_namespace(namespace: &str) -> Self {
        let extension = match namespace.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Self::Properties,
        };

        match extension.as_str() {
            "xml" => Self::Xml,
            "json" => Self::Json,
            "yml" => Self::Yml,
            "yaml" => Self::Yaml,
            "txt" => Self::Txt,
            _ => Self::Properties,
        }
    }

    /// Content type served for a raw response in this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Properties | Self::Txt => TEXT_PLAIN,
            Self::Json => APPLICATION_JSON,
            Self::Xml => APPLICATION_XML,
            Self::Yml | Self::Yaml => APPLICATION_YAML,
        }
    }

    pub fn is_properties(&self) -> bool {
        matches!(self, Self::Properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_names_are_distinct() {
        let names = [
            OutputFormat::Properties.as_str(),
            OutputFormat::Json.as_str(),
            OutputFormat::Raw.as_str(),
        ];

        assert_eq!(names, ["properties", "json", "raw"]);
    }

    #[test]
    fn test_file_format_detection() {
        assert_eq!(ConfigFileFormat::from_namespace("a.json"), ConfigFileFormat::Json);
        assert_eq!(ConfigFileFormat::from_namespace("a.XML"), ConfigFileFormat::Xml);
        assert_eq!(ConfigFileFormat::from_namespace("a.yaml"), ConfigFileFormat::Yaml);
        assert_eq!(ConfigFileFormat::from_namespace("a.txt"), ConfigFileFormat::Txt);
        assert_eq!(ConfigFileFormat::from_namespace("team.redis"), ConfigFileFormat::Properties);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ConfigFileFormat::Json.content_type(), "application/json;charset=UTF-8");
        assert_eq!(ConfigFileFormat::Yml.content_type(), ConfigFileFormat::Yaml.content_type());
        assert_eq!(ConfigFileFormat::Txt.content_type(), "text/plain;charset=UTF-8");
    }
}
