//! The set of document formats the bridge understands.
//!
//! Browsers submit the source and target format as plain form values
//! (`from_lang=json`, `to_lang=yaml`).  [`Format`] is the typed counterpart
//! of those strings: parsing happens once at the edge, and everything past
//! that point matches on the enum instead of comparing strings.

use std::fmt;
use std::str::FromStr;

use crate::bridge::ConversionError;

/// A textual serialization format supported by the bridge.
///
/// # Example
///
/// ```rust
/// use docbridge_core::Format;
///
/// let format: Format = "YAML".parse().unwrap();
/// assert_eq!(format, Format::Yaml);
/// assert_eq!(format.as_str(), "yaml");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Every supported format, in the order the converter page lists them.
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Toml];

    /// Returns the canonical lower-case form value (`"json"`, `"yaml"`, `"toml"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    /// Human-readable label used in the HTML format selector.
    pub fn label(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Toml => "TOML",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ConversionError;

    /// Parses a form value.  Matching is case-insensitive and ignores
    /// surrounding whitespace; `yml` is accepted as an alias for YAML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            "toml" => Ok(Format::Toml),
            _ => Err(ConversionError::UnsupportedFormat(s.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
