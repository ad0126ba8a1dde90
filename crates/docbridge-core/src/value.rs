//! Conversions between each format's native tree and the generic document
//! value.
//!
//! The bridge never converts YAML to TOML (or any pair) directly.  Every
//! document is first normalised into a [`serde_json::Value`]: an untyped tree
//! of maps, sequences, strings, numbers, booleans and null.  The target
//! encoder then works from that single representation.
//!
//! ```text
//! serde_yaml::Value ──┐                   ┌──> serde_yaml::to_string
//! toml::Value ────────┼──> serde_json::Value ──> toml::Value
//! serde_json (parse) ─┘                   └──> serde_json (pretty)
//! ```
//!
//! Some information cannot survive the trip, and the functions here decide
//! what happens to it:
//!
//! | Source construct          | Result                                  |
//! |---------------------------|-----------------------------------------|
//! | YAML non-string map key   | key rendered as its YAML scalar text    |
//! | two keys, same text       | error (`1` and `'1'` would collide)     |
//! | YAML tag (`!foo bar`)     | tag dropped, inner value kept           |
//! | YAML/TOML `inf` / `nan`   | error (JSON numbers must be finite)     |
//! | TOML datetime             | RFC 3339 string                         |
//! | null → TOML               | error (TOML has no null)                |
//! | integer > `i64::MAX` → TOML | error (TOML integers are 64-bit signed) |

use serde_json::{Map, Number, Value};

// ── YAML → generic ────────────────────────────────────────────────────────────

/// Normalises a parsed YAML tree into the generic document value.
///
/// # Errors
///
/// Returns a message if the tree holds a non-finite float, which has no JSON
/// representation.
pub fn yaml_to_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(num) => {
            if let Some(i) = num.as_i64() {
                Ok(Value::Number(Number::from(i)))
            } else if let Some(u) = num.as_u64() {
                Ok(Value::Number(Number::from(u)))
            } else {
                let f = num.as_f64().unwrap_or(f64::NAN);
                float_to_number(f).map(Value::Number)
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => seq
            .into_iter()
            .map(yaml_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(mapping) => {
            let mut obj = Map::new();
            for (key, value) in mapping {
                let key = yaml_key_to_string(key);
                let value = yaml_to_value(value)?;
                // `1` and `'1'` are distinct YAML keys but the same string key.
                if obj.contains_key(&key) {
                    return Err(format!(
                        "duplicate key '{key}' after converting keys to strings"
                    ));
                }
                obj.insert(key, value);
            }
            Ok(Value::Object(obj))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

/// Renders a YAML mapping key as a string.
///
/// JSON and TOML only allow string keys, so `1: one` becomes `"1": "one"` and
/// `true: yes` becomes `"true": "yes"`.  Complex keys (sequences, maps) fall
/// back to their flow-style YAML text.
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

// ── TOML → generic ────────────────────────────────────────────────────────────

/// Normalises a parsed TOML tree into the generic document value.
///
/// Datetimes become their RFC 3339 string form.
///
/// # Errors
///
/// Returns a message if the document holds `inf` or `nan`.
pub fn toml_to_value(toml: toml::Value) -> Result<Value, String> {
    match toml {
        toml::Value::String(s) => Ok(Value::String(s)),
        toml::Value::Integer(i) => Ok(Value::Number(Number::from(i))),
        toml::Value::Float(f) => float_to_number(f).map(Value::Number),
        toml::Value::Boolean(b) => Ok(Value::Bool(b)),
        toml::Value::Datetime(dt) => Ok(Value::String(dt.to_string())),
        toml::Value::Array(arr) => arr
            .into_iter()
            .map(toml_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        toml::Value::Table(table) => {
            let mut obj = Map::new();
            for (key, value) in table {
                obj.insert(key, toml_to_value(value)?);
            }
            Ok(Value::Object(obj))
        }
    }
}

// ── generic → TOML ────────────────────────────────────────────────────────────

/// Converts the generic document value into a TOML tree.
///
/// The root-must-be-a-table rule is enforced by the caller; this function
/// converts any value so it can recurse.
///
/// # Errors
///
/// Returns a message naming the dotted path of the first value TOML cannot
/// hold: a null, or an unsigned integer above `i64::MAX`.
pub fn value_to_toml(value: &Value) -> Result<toml::Value, String> {
    to_toml_at(value, "")
}

fn to_toml_at(value: &Value, path: &str) -> Result<toml::Value, String> {
    match value {
        Value::Null => Err(format!("TOML has no null value (at `{}`)", display_path(path))),
        Value::Bool(b) => Ok(toml::Value::Boolean(*b)),
        Value::Number(num) => {
            if let Some(i) = num.as_i64() {
                Ok(toml::Value::Integer(i))
            } else if num.is_u64() {
                Err(format!(
                    "integer {num} does not fit in a TOML integer (at `{}`)",
                    display_path(path)
                ))
            } else {
                // serde_json only produces finite floats, so this never loses data.
                Ok(toml::Value::Float(num.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => Ok(toml::Value::String(s.clone())),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| to_toml_at(item, &format!("{path}[{idx}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(toml::Value::Array),
        Value::Object(map) => {
            let mut table = toml::value::Table::new();
            for (key, item) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                table.insert(key.clone(), to_toml_at(item, &child)?);
            }
            Ok(toml::Value::Table(table))
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

fn float_to_number(f: f64) -> Result<Number, String> {
    Number::from_f64(f).ok_or_else(|| format!("non-finite number {f} cannot be represented"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
