//! Small text encoders that sit next to the format converter: Base64 and URL
//! percent-encoding.
//!
//! Both tools share one shape: an [`Operation`] (encode or decode) applied to
//! a UTF-8 string.  Decoding can fail, and because the web page only shows
//! text, decoded bytes must also be valid UTF-8.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use thiserror::Error;

/// Errors raised by the text tools.
#[derive(Debug, Error, PartialEq)]
pub enum TextCodecError {
    /// Operation name other than `encode` / `decode`.
    #[error("unsupported operation '{0}' (expected encode or decode)")]
    UnsupportedOperation(String),

    /// The Base64 input is malformed.
    #[error("invalid base64 input: {0}")]
    InvalidBase64(String),

    /// The decoded bytes are not UTF-8 text.
    #[error("decoded data is not valid UTF-8 text")]
    InvalidUtf8,
}

/// Direction of a text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = TextCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encode" => Ok(Operation::Encode),
            "decode" => Ok(Operation::Decode),
            _ => Err(TextCodecError::UnsupportedOperation(s.to_string())),
        }
    }
}

// ── Base64 ────────────────────────────────────────────────────────────────────

/// Encodes `input` with the URL-safe Base64 alphabet, padded.
///
/// ```rust
/// use docbridge_core::text_codec::base64_encode;
/// assert_eq!(base64_encode("hi?"), "aGk_");
/// ```
pub fn base64_encode(input: &str) -> String {
    URL_SAFE.encode(input.as_bytes())
}

/// Decodes URL-safe, padded Base64 back into text.
///
/// Surrounding whitespace is ignored so pasted values with a trailing newline
/// still decode.
///
/// # Errors
///
/// [`TextCodecError::InvalidBase64`] for malformed input and
/// [`TextCodecError::InvalidUtf8`] if the bytes are not text.
pub fn base64_decode(input: &str) -> Result<String, TextCodecError> {
    let bytes = URL_SAFE
        .decode(input.trim())
        .map_err(|e| TextCodecError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| TextCodecError::InvalidUtf8)
}

// ── URL percent-encoding ──────────────────────────────────────────────────────

/// Percent-encodes every byte outside the unreserved set (`A-Z a-z 0-9 - _ . ~`).
pub fn url_encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Decodes percent-escapes, treating `+` as a space the way HTML form
/// submissions do.
///
/// # Errors
///
/// [`TextCodecError::InvalidUtf8`] if the escapes decode to non-UTF-8 bytes.
pub fn url_decode(input: &str) -> Result<String, TextCodecError> {
    let normalized = input.replace('+', " ");
    urlencoding::decode(&normalized)
        .map(|cow| cow.into_owned())
        .map_err(|_| TextCodecError::InvalidUtf8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
