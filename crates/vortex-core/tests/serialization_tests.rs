mod common;

use common::{application_release, file_release};
use vortex_core::{OutputFormat, ReleasedConfig, render};

#[test]
fn test_release_roundtrip_keeps_order_and_watch_keys() {
    let release = application_release();

    let json = serde_json::to_string(&release).unwrap();
    assert!(json.contains("\"namespaceName\":\"application\""));
    assert!(json.contains("\"watchKeys\""));

    let parsed: ReleasedConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, release);

    let keys: Vec<_> = parsed.configurations.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["server.port", "db.url", "greeting"]);
}

#[test]
fn test_render_properties() {
    let response = render(&application_release(), OutputFormat::Properties).unwrap();

    assert_eq!(
        response.body,
        "server.port=8080\ndb.url=jdbc:postgres://local:5432/pay\ngreeting=hello world\n"
    );
    assert_eq!(response.content_type, "text/plain;charset=UTF-8");
}

#[test]
fn test_render_json_is_flat_object() {
    let response = render(&application_release(), OutputFormat::Json).unwrap();

    let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(value["server.port"], "8080");
    assert_eq!(value["greeting"], "hello world");
    assert_eq!(response.content_type, "application/json;charset=UTF-8");
}

#[test]
fn test_render_raw_json_namespace() {
    let content = r#"{"pool":{"max":10}}"#;
    let response = render(&file_release("datasource.json", content), OutputFormat::Raw).unwrap();

    assert_eq!(response.body, content);
    assert_eq!(response.content_type, "application/json;charset=UTF-8");
    assert_eq!(response.weight(), content.len());
}

#[test]
fn test_render_raw_xml_namespace() {
    let content = "<beans/>";
    let response = render(&file_release("beans.xml", content), OutputFormat::Raw).unwrap();

    assert_eq!(response.body, content);
    assert_eq!(response.content_type, "application/xml;charset=UTF-8");
}
