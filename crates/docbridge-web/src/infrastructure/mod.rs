//! Infrastructure layer for docbridge-web.
//!
//! Everything that touches HTTP: the listener, routing, the signed session
//! cookie, HTML rendering and request logging.
//!
//! # What does NOT belong here?
//!
//! - What a submission does to the session (that is the application layer)
//! - Session and configuration types (that is the domain layer)
//! - Configuration parsing (that is done in `main.rs`)

pub mod access_log;
pub mod handlers;
pub mod http_server;
pub mod session_cookie;
pub mod views;

// Re-export the primary entry points so `main.rs` and tests can call them concisely.
pub use http_server::{build_router, run_server, serve, AppState};
pub use session_cookie::{Session, SessionError, SessionSigner};
