//! Integration tests for the format bridge.
//!
//! These exercise the public API end to end: a document is written in one
//! format, pushed through one or more conversions, and compared as a generic
//! value at the end so formatting differences do not matter.

use docbridge_core::{convert, convert_named, decode, encode, ConversionError, Format};
use serde_json::{json, Value};

/// A document that every format can represent (no nulls, object root).
fn portable_document() -> Value {
    json!({
        "name": "docbridge",
        "version": 3,
        "ratio": 0.75,
        "enabled": true,
        "tags": ["json", "yaml", "toml"],
        "owner": {"name": "Ada", "id": 7},
        "servers": [
            {"host": "alpha", "port": 8080},
            {"host": "beta", "port": 8081}
        ]
    })
}

/// Documents with null, which TOML cannot hold.
fn documents_with_null() -> Vec<Value> {
    vec![
        json!(null),
        json!({"a": null}),
        json!({"list": [1, null, {"deep": null}]}),
    ]
}

fn sample_json_documents() -> Vec<Value> {
    let mut docs = vec![
        portable_document(),
        json!([]),
        json!({}),
        json!("plain string"),
        json!(-12),
        json!([1, [2, [3, [4]]]]),
        json!({"unicode": "żółć ✓", "escaped": "line\nbreak \"quoted\""}),
    ];
    docs.extend(documents_with_null());
    docs
}

#[test]
fn test_json_to_json_roundtrip_preserves_value() {
    for original in sample_json_documents() {
        // Arrange
        let text = encode(&original, Format::Json).expect("encode must succeed");

        // Act
        let output = convert(&text, Format::Json, Format::Json).expect("convert must succeed");

        // Assert
        let decoded: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(decoded, original, "JSON round-trip changed the document");
    }
}

#[test]
fn test_json_to_yaml_to_json_roundtrip_preserves_value() {
    for original in sample_json_documents() {
        let json_text = encode(&original, Format::Json).unwrap();

        let yaml_text = convert(&json_text, Format::Json, Format::Yaml).unwrap();
        let back = convert(&yaml_text, Format::Yaml, Format::Json).unwrap();

        assert_eq!(decode(&back, Format::Json).unwrap(), original, "via YAML:\n{yaml_text}");
    }
}

#[test]
fn test_json_to_toml_to_json_roundtrip_for_portable_document() {
    let original = portable_document();
    let json_text = encode(&original, Format::Json).unwrap();

    let toml_text = convert(&json_text, Format::Json, Format::Toml).unwrap();
    let back = convert(&toml_text, Format::Toml, Format::Json).unwrap();

    assert_eq!(decode(&back, Format::Json).unwrap(), original, "via TOML:\n{toml_text}");
}

#[test]
fn test_yaml_to_toml_to_yaml_chain() {
    let yaml = "title: chain\nitems:\n- 1\n- 2\nnested:\n  flag: false\n";

    let toml_text = convert(yaml, Format::Yaml, Format::Toml).unwrap();
    let yaml_again = convert(&toml_text, Format::Toml, Format::Yaml).unwrap();

    assert_eq!(
        decode(&yaml_again, Format::Yaml).unwrap(),
        decode(yaml, Format::Yaml).unwrap()
    );
}

#[test]
fn test_nulls_never_reach_toml() {
    for doc in documents_with_null() {
        let text = encode(&doc, Format::Json).unwrap();

        let result = convert(&text, Format::Json, Format::Toml);

        assert!(
            matches!(result, Err(ConversionError::Encode { format: Format::Toml, .. })),
            "expected TOML encode error for {doc}, got {result:?}"
        );
    }
}

#[test]
fn test_malformed_input_for_each_format() {
    let cases = [
        ("{not json", Format::Json),
        ("key: [unterminated", Format::Yaml),
        ("= no key", Format::Toml),
    ];

    for (input, format) in cases {
        for target in Format::ALL {
            let err = convert(input, format, target).unwrap_err();
            assert!(
                matches!(err, ConversionError::Parse { format: f, .. } if f == format),
                "{format} → {target}: unexpected {err:?}"
            );
            assert!(!err.to_string().is_empty());
        }
    }
}

#[test]
fn test_convert_named_accepts_form_values() {
    let output = convert_named(r#"{"a": 1}"#, "json", "toml").unwrap();
    assert_eq!(output, "a = 1\n");
}

#[test]
fn test_convert_named_unknown_format_yields_no_output() {
    let result = convert_named(r#"{"a": 1}"#, "json", "xml");
    assert_eq!(result, Err(ConversionError::UnsupportedFormat("xml".to_string())));
}

#[test]
fn test_yaml_keys_that_collide_as_strings_produce_no_output() {
    // `1` (integer) and `'1'` (string) are different YAML keys.
    let input = "1: a\n'1': b\n";

    for target in Format::ALL {
        let result = convert(input, Format::Yaml, target);
        assert!(
            matches!(&result, Err(ConversionError::Parse { format: Format::Yaml, message }) if message.contains("duplicate key")),
            "YAML → {target}: expected a duplicate key error, got {result:?}"
        );
    }
}
