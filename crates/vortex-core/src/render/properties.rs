use crate::format::OutputFormat;
use crate::release::{ReleasedConfig, RenderedResponse};

/// Convierte la configuracion a formato .properties, una linea por entry.
pub fn render(config: &ReleasedConfig) -> RenderedResponse {
    RenderedResponse::new(
        to_properties_string(config),
        OutputFormat::Properties.rendered_content_type(),
        OutputFormat::Properties,
    )
}

pub(crate) fn to_properties_string(config: &ReleasedConfig) -> String {
    let mut output = String::new();

    for (key, value) in &config.configurations {
        output.push_str(&escape_properties_key(key));
        output.push('=');
        output.push_str(&escape_properties_value(value));
        output.push('\n');
    }

    output
}

/// Escapa caracteres especiales en keys de properties.
fn escape_properties_key(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' | ':' | '=' | ' ' | '#' | '!' => {
                escaped.push('\\');
                escaped.push(c);
            },
            _ => push_control(&mut escaped, c),
        }
    }
    escaped
}

/// Escapa caracteres especiales en values de properties.
/// Un espacio inicial se escapa para que no se pierda al leer.
fn escape_properties_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.chars().enumerate() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ' ' if i == 0 => escaped.push_str("\\ "),
            _ => push_control(&mut escaped, c),
        }
    }
    escaped
}

fn push_control(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_entries() {
        let config = ReleasedConfig::new("app", "default", "application", "r1")
            .with_entry("server.port", "8080")
            .with_entry("feature.enabled", "true");

        let response = render(&config);

        assert_eq!(response.body, "server.port=8080\nfeature.enabled=true\n");
        assert_eq!(response.content_type, "text/plain;charset=UTF-8");
        assert_eq!(response.format, OutputFormat::Properties);
    }

    #[test]
    fn test_key_escaping() {
        assert_eq!(escape_properties_key("a b"), "a\\ b");
        assert_eq!(escape_properties_key("a:b=c"), "a\\:b\\=c");
        assert_eq!(escape_properties_key("#x!"), "\\#x\\!");
    }

    #[test]
    fn test_value_escaping() {
        assert_eq!(escape_properties_value("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_properties_value(" padded"), "\\ padded");
        assert_eq!(escape_properties_value("a b"), "a b");
        assert_eq!(escape_properties_value("c:\\tmp"), "c:\\\\tmp");
    }

    #[test]
    fn test_empty_config_renders_empty_body() {
        let config = ReleasedConfig::new("app", "default", "application", "r1");
        assert!(render(&config).body.is_empty());
    }
}
