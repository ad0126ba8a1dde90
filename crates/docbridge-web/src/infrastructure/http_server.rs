//! HTTP server: router assembly and the serve loop.
//!
//! [`build_router`] wires the routes, the body size limit, gzip compression
//! and the access log around a shared [`AppState`].  It is separate from
//! [`run_server`] so tests can drive the router directly with
//! `tower::ServiceExt::oneshot`, no socket needed.
//!
//! # Routes
//!
//! ```text
//! GET  /health           {"status":"OK"}
//! GET  /                 landing page
//! GET  /converter        converter page, from session
//! POST /api/converter    convert, 303 → /converter
//! GET  /base64           Base64 page, from session
//! POST /api/base64       encode/decode, 303 → /base64
//! GET  /htmlencode       URL codec page, from session
//! POST /api/htmlencode   encode/decode, 303 → /htmlencode
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::domain::WebConfig;
use crate::infrastructure::access_log::AccessLogLayer;
use crate::infrastructure::handlers;
use crate::infrastructure::session_cookie::SessionSigner;

/// Read-only state shared by every request.
pub struct AppState {
    pub signer: Arc<SessionSigner>,
}

impl AppState {
    pub fn new(config: &WebConfig) -> Self {
        Self {
            signer: Arc::new(SessionSigner::new(config.session.clone())),
        }
    }
}

/// Builds the application router for `config`.
pub fn build_router(config: &WebConfig) -> Router {
    let state = Arc::new(AppState::new(config));

    // Layers added last run first: the access log sees the final status,
    // including 413s from the body limit.
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::root))
        .route("/converter", get(handlers::converter_page))
        .route("/api/converter", post(handlers::convert))
        .route("/base64", get(handlers::base64_page))
        .route("/api/base64", post(handlers::base64))
        .route("/htmlencode", get(handlers::url_codec_page))
        .route("/api/htmlencode", post(handlers::url_codec))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(AccessLogLayer)
}

/// Binds `config.listen_addr` and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, no
/// permission) or the server fails.
pub async fn run_server<F>(config: WebConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.listen_addr))?;

    serve(listener, &config, shutdown).await
}

/// Serves the router on an already bound `listener` until `shutdown`
/// resolves, then lets in-flight requests finish.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<F>(listener: TcpListener, config: &WebConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!(%addr, "docbridge web server listening");

    let app = build_router(config).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}
