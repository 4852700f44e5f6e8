//! Schema File Tests
//!
//! Schema documents loaded from disk:
//! - Named types resolve through the `types` section
//! - Malformed files fail while loading, unknown types fail at derivation
//! - Derived codecs drive whole CSV texts

use std::fs;
use std::path::PathBuf;

use csvderive::cli::{self, Config};
use csvderive::codec::{Codec, Value};
use csvderive::driver::parse_values;
use csvderive::schema::{CodecOverrides, SchemaError, SchemaLoader};
use tempfile::TempDir;

const INVOICE: &str = r#"{
    "name": "Invoice",
    "fields": [
        {"name": "number", "type": "long"},
        {"name": "issued", "type": "date"},
        {"name": "paid", "type": "bool", "optional": true},
        {"name": "billing", "type": "Address"},
        {"name": "shipping", "type": "Address", "optional": true},
        {"name": "totals", "type": "record", "fields": [
            {"name": "net", "type": "double"},
            {"name": "currency", "type": "char"}
        ]}
    ],
    "types": {
        "Address": {"fields": [
            {"name": "street", "type": "string"},
            {"name": "zip", "type": "short"}
        ]}
    }
}"#;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_file(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// Loading and Derivation Tests
// =============================================================================

#[test]
fn test_named_types_are_shared() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "invoice.json", INVOICE);

    let doc = SchemaLoader::load_file(&path).unwrap();
    let codec = doc.derive(&CodecOverrides::new()).unwrap();

    assert_eq!(codec.width(), 9);
    assert_eq!(
        codec.header(),
        vec!["number", "issued", "paid", "street", "zip", "street", "zip", "net", "currency"]
    );
}

#[test]
fn test_parse_text_with_document_codec() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "invoice.json", INVOICE);
    let codec = SchemaLoader::load_file(&path)
        .unwrap()
        .derive(&CodecOverrides::new())
        .unwrap();

    let text = "header\n\
                42,2024-03-01,,Main St,1000,,,99.5,E\n\
                43,2024-03-02,yes,Main St,1000,,,1.0,E\n";
    let results = parse_values(&codec, text, true);

    assert_eq!(results.len(), 2);
    let first = results[0].as_ref().unwrap().as_record().unwrap();
    assert_eq!(first[0], Value::Long(42));
    assert_eq!(first[2], Value::absent());
    assert_eq!(first[4], Value::absent());
    assert_eq!(
        results[1].as_ref().unwrap_err().to_string(),
        "Cannot parse [yes] to Boolean"
    );
}

#[test]
fn test_unknown_type_is_derivation_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        &tmp,
        "bad.json",
        r#"{"name": "T", "fields": [{"name": "when", "type": "timestamp"}]}"#,
    );

    let doc = SchemaLoader::load_file(&path).unwrap();
    assert_eq!(
        doc.derive(&CodecOverrides::new()).unwrap_err(),
        SchemaError::UnresolvedType {
            field_path: "when".into(),
            type_name: "timestamp".into(),
        }
    );
}

#[test]
fn test_self_referencing_type_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        &tmp,
        "node.json",
        r#"{
            "name": "Tree",
            "fields": [{"name": "root", "type": "Node"}],
            "types": {"Node": {"fields": [
                {"name": "value", "type": "int"},
                {"name": "next", "type": "Node", "optional": true}
            ]}}
        }"#,
    );

    let doc = SchemaLoader::load_file(&path).unwrap();
    assert!(matches!(
        doc.derive(&CodecOverrides::new()),
        Err(SchemaError::RecursiveType { .. })
    ));
}

#[test]
fn test_unknown_key_is_malformed() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        &tmp,
        "extra.json",
        r#"{"name": "T", "fields": [{"name": "x", "type": "int", "default": 0}]}"#,
    );

    assert!(matches!(
        SchemaLoader::load_file(&path),
        Err(SchemaError::Malformed { .. })
    ));
}

// =============================================================================
// CLI Command Tests
// =============================================================================

#[test]
fn test_parse_then_format_round_trip() {
    let tmp = TempDir::new().unwrap();
    let schema = write_file(&tmp, "invoice.json", INVOICE);
    let config = Config::default();
    let csv = "number,issued,paid,street,zip,street,zip,net,currency\n\
               7,2024-01-15,true,Elm,12,Oak,34,10.5,$\n\
               8,2024-01-16,,Elm,12,,,0.25,$\n";

    let mut parsed = Vec::new();
    cli::parse(&schema, &config, true, csv, &mut parsed).unwrap();

    let records: String = String::from_utf8(parsed)
        .unwrap()
        .lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            format!("{}\n", v["record"])
        })
        .collect();

    let mut formatted = Vec::new();
    cli::format(&schema, &config, true, &records, &mut formatted).unwrap();
    assert_eq!(String::from_utf8(formatted).unwrap(), csv);
}

#[test]
fn test_config_file_drives_commands() {
    let tmp = TempDir::new().unwrap();
    let schema = write_file(&tmp, "invoice.json", INVOICE);
    let config_path = write_file(
        &tmp,
        "csvderive.json",
        r#"{"has_header": false, "date_format": "%d.%m.%Y"}"#,
    );
    let config = Config::load(&config_path).unwrap();

    let mut out = Vec::new();
    cli::parse(
        &schema,
        &config,
        config.has_header,
        "1,29.02.2024,false,A,1,,,2.0,E",
        &mut out,
    )
    .unwrap();

    let line: serde_json::Value = serde_json::from_str(String::from_utf8(out).unwrap().trim_end()).unwrap();
    assert_eq!(line["status"], "ok");
    assert_eq!(line["record"]["issued"], "2024-02-29");
}
