//! Domain layer for docbridge-web.
//!
//! Pure types with no dependency on I/O, HTTP or the async runtime:
//!
//! - Configuration (`WebConfig`)
//! - What a session remembers (`SessionData`)
//! - The form payloads the browser posts
//!
//! Cookie encoding, signing and HTTP extraction live in the infrastructure
//! layer.

pub mod config;
pub mod forms;
pub mod session;

pub use config::{ConfigError, SessionConfig, WebConfig};
pub use forms::{ConverterForm, TextToolForm};
pub use session::{ConverterState, SessionData, TextToolState};
