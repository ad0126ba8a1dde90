//! The format bridge: decode with the source format, encode with the target.
//!
//! ```text
//! input text ──decode(from)──> serde_json::Value ──encode(to)──> output text
//! ```
//!
//! The functions in this module are pure: no I/O, no shared state, no async.
//! The YAML, TOML and JSON crates expose stateless free functions, so there is
//! no codec instance to construct or share between requests.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::format::Format;
use crate::value::{toml_to_value, value_to_toml, yaml_to_value};

/// Indentation used for JSON output.
const JSON_INDENT: &[u8] = b"    ";

// ── Error type ────────────────────────────────────────────────────────────────

/// Everything that can go wrong while converting a document.
///
/// The web layer never turns this into an HTTP error status: the `Display`
/// text is stored in the session and shown next to the form.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    /// The input is not valid for the declared source format.
    ///
    /// `message` is the underlying parser's own description, which usually
    /// includes a line and column.
    #[error("{} parse error: {message}", .format.label())]
    Parse { format: Format, message: String },

    /// The decoded document cannot be written in the target format
    /// (e.g. a null value or a non-table root when the target is TOML).
    #[error("{} encode error: {message}", .format.label())]
    Encode { format: Format, message: String },

    /// A format name outside `json`, `yaml`, `toml`.
    #[error("unsupported format '{0}' (expected json, yaml or toml)")]
    UnsupportedFormat(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Converts `input` from one format to another.
///
/// JSON output has its keys sorted and is indented with four spaces; YAML and
/// TOML use their crate's default layout.  Converting a format to itself is
/// not a no-op: the document is re-parsed and re-emitted in canonical form.
///
/// # Errors
///
/// - [`ConversionError::Parse`] if `input` is malformed for `from`.
/// - [`ConversionError::Encode`] if the document cannot be expressed in `to`.
///
/// # Example
///
/// ```rust
/// use docbridge_core::{convert, Format};
///
/// let yaml = convert(r#"{"a": 1, "b": [2, 3]}"#, Format::Json, Format::Yaml).unwrap();
/// assert_eq!(yaml, "a: 1\nb:\n- 2\n- 3\n");
/// ```
pub fn convert(input: &str, from: Format, to: Format) -> Result<String, ConversionError> {
    let value = decode(input, from)?;
    let output = encode(&value, to)?;
    debug!(
        from = from.as_str(),
        to = to.as_str(),
        input_len = input.len(),
        output_len = output.len(),
        "document converted"
    );
    Ok(output)
}

/// Like [`convert`], but takes the raw form values for the two formats.
///
/// # Errors
///
/// Returns [`ConversionError::UnsupportedFormat`] if either name is not a
/// known format (the source is checked first), otherwise whatever
/// [`convert`] returns.
pub fn convert_named(input: &str, from_lang: &str, to_lang: &str) -> Result<String, ConversionError> {
    let from: Format = from_lang.parse()?;
    let to: Format = to_lang.parse()?;
    convert(input, from, to)
}

/// Parses `input` as `format` into the generic document value.
///
/// # Errors
///
/// Returns [`ConversionError::Parse`] with the parser's message.
pub fn decode(input: &str, format: Format) -> Result<Value, ConversionError> {
    let parse_err = |message: String| ConversionError::Parse { format, message };

    match format {
        Format::Json => serde_json::from_str(input).map_err(|e| parse_err(e.to_string())),
        Format::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(input).map_err(|e| parse_err(e.to_string()))?;
            yaml_to_value(yaml).map_err(parse_err)
        }
        Format::Toml => {
            let toml: toml::Value = input
                .parse()
                .map_err(|e: toml::de::Error| parse_err(toml_error_message(input, &e)))?;
            toml_to_value(toml).map_err(parse_err)
        }
    }
}

/// Serializes the generic document value as `format`.
///
/// # Errors
///
/// Returns [`ConversionError::Encode`] if the value has no representation in
/// `format`.
pub fn encode(value: &Value, format: Format) -> Result<String, ConversionError> {
    let encode_err = |message: String| ConversionError::Encode { format, message };

    match format {
        Format::Json => encode_json(value).map_err(encode_err),
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| encode_err(e.to_string())),
        Format::Toml => {
            if !value.is_object() {
                return Err(encode_err(format!(
                    "a TOML document must be a table, not {}",
                    kind_name(value)
                )));
            }
            let toml = value_to_toml(value).map_err(encode_err)?;
            toml::to_string(&toml).map_err(|e| encode_err(e.to_string()))
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Pretty-prints JSON with [`JSON_INDENT`] and `": "` between keys and values.
///
/// Keys come out sorted because `serde_json::Map` is a `BTreeMap` when the
/// `preserve_order` feature is off.
fn encode_json(value: &Value) -> Result<String, String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(|e| e.to_string())?;
    String::from_utf8(buf).map_err(|e| e.to_string())
}

/// The parser's message on one line plus `at line L column C`, the same shape
/// as the JSON and YAML errors.
fn toml_error_message(input: &str, err: &toml::de::Error) -> String {
    let message = err.message().trim_end().replace('\n', "; ");
    match err.span() {
        Some(span) => {
            let (line, column) = line_column(input, span.start);
            format!("{message} at line {line} column {column}")
        }
        None => message,
    }
}

/// 1-based line and column (in characters) of byte `offset` in `input`.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
