//! Application layer for docbridge-web.
//!
//! The application layer decides *what* a form submission does to the
//! session; the infrastructure layer decides *how* the session travels
//! (signed cookie) and how the result reaches the browser (redirect + HTML).
//!
//! # Responsibilities
//!
//! - Running the converter and text tools on submitted form data
//! - Writing results or inline error messages into the session record
//!
//! # What does NOT belong here?
//!
//! - Cookie signing or parsing (that is infrastructure)
//! - HTML rendering and HTTP status codes (also infrastructure)
//! - Format parsing and encoding (that is `docbridge-core`)

pub mod converter_service;

pub use converter_service::{apply_base64, apply_conversion, apply_url_codec};
