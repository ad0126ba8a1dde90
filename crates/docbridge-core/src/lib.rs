//! # docbridge-core
//!
//! Pure conversion logic for docbridge: the format bridge between JSON, YAML
//! and TOML, and the Base64 / URL text codecs used by the sibling tools.
//!
//! This crate has no I/O, no async runtime and no HTTP types.  The web crate
//! calls into it from its request handlers.
//!
//! # Modules
//!
//! - **`format`**: the [`Format`] enum and parsing of form values.
//! - **`bridge`**: `decode` → generic value → `encode`, plus [`ConversionError`].
//! - **`value`**: how YAML and TOML trees map onto the generic value
//!   (`serde_json::Value`) and back.
//! - **`text_codec`**: Base64 and percent-encoding.

pub mod bridge;
pub mod format;
pub mod text_codec;
pub mod value;

pub use bridge::{convert, convert_named, decode, encode, ConversionError};
pub use format::Format;
pub use text_codec::{Operation, TextCodecError};
