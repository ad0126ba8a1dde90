//! What a browser's session remembers between requests.
//!
//! Each tool keeps the result of its last submission so that the page shown
//! after the redirect can render it.  The whole record is serialized into the
//! signed session cookie; every field is a plain string and defaults to empty,
//! so a session written by an older build (or no session at all) still
//! deserializes.

use serde::{Deserialize, Serialize};

/// Per-client session record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionData {
    /// Last submission to the JSON/YAML/TOML converter.
    pub converter: ConverterState,

    /// Last submission to the Base64 tool.
    pub base64: TextToolState,

    /// Last submission to the URL encode/decode tool.
    pub url_codec: TextToolState,
}

/// State of the converter page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterState {
    pub input: String,
    pub output: String,
    /// Inline error message; empty when the last conversion succeeded.
    pub error: String,
    pub from_lang: String,
    pub to_lang: String,
}

/// State of a two-way text tool page (Base64, URL encoding).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextToolState {
    /// `"encode"` or `"decode"`, as submitted.
    pub operation: String,
    pub input: String,
    pub output: String,
    pub error: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
