//! HTML form payloads posted by the browser.
//!
//! These mirror the `name=` attributes in the templates.  Every field is
//! optional on the wire (`#[serde(default)]`): a missing field arrives as an
//! empty string and is reported inline by the application layer rather than
//! rejected with a 422.

use serde::Deserialize;

/// Body of `POST /api/converter`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConverterForm {
    pub input: String,
    pub from_lang: String,
    pub to_lang: String,
}

/// Body of `POST /api/base64` and `POST /api/htmlencode`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextToolForm {
    pub operation: String,
    pub input: String,
}
