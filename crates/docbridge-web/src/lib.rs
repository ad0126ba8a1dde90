//! docbridge-web library crate.
//!
//! A small browser tool site: a JSON/YAML/TOML converter plus Base64 and URL
//! encode/decode tools.  Each tool is a form that posts to `/api/...`; the
//! result is stored in a signed cookie session and shown after a redirect.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Browser (HTML form POST, 303, GET)
//!         ↕
//! [docbridge-web]
//!   ├── domain/           Pure types: WebConfig, SessionData, form payloads
//!   ├── application/      apply_conversion / apply_base64 / apply_url_codec
//!   └── infrastructure/
//!         ├── http_server     axum router, body limit, gzip, serve loop
//!         ├── handlers        GET pages and POST redirect-after-post
//!         ├── session_cookie  HMAC-signed cookie + `Session` extractor
//!         ├── views           HTML templates and escaping
//!         └── access_log      per-request log line
//!         ↕
//! [docbridge-core]  format bridge and text codecs
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O, no async and no HTTP types.
//! - `application` depends on `domain` and `docbridge-core` only.
//! - `infrastructure` depends on all other layers plus `axum` and `tokio`.

/// Domain layer: configuration and session types (no I/O).
pub mod domain;

/// Application layer: what each form submission does to the session.
pub mod application;

/// Infrastructure layer: HTTP server, cookies and rendering.
pub mod infrastructure;
