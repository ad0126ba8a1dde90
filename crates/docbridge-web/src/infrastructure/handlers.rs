//! Route handlers.
//!
//! Every `POST /api/*` handler follows the same redirect-after-post shape:
//! run the application operation against the session, then answer
//! `303 See Other` to the tool's page with the updated session cookie.  The
//! matching `GET` handler only reads the session and renders it.

use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Serialize;
use tracing::error;

use crate::application::{apply_base64, apply_conversion, apply_url_codec};
use crate::domain::{ConverterForm, TextToolForm};
use crate::infrastructure::session_cookie::Session;
use crate::infrastructure::views::{self, TextTool};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "OK" })
}

/// `GET /`
pub async fn root() -> Html<String> {
    Html(views::render_root())
}

// ── Converter ─────────────────────────────────────────────────────────────────

/// `GET /converter`
pub async fn converter_page(session: Session) -> Html<String> {
    Html(views::render_converter(&session.data.converter))
}

/// `POST /api/converter`
pub async fn convert(mut session: Session, Form(form): Form<ConverterForm>) -> Response {
    apply_conversion(&mut session.data.converter, &form);
    redirect_with_session(&session, "/converter")
}

// ── Text tools ────────────────────────────────────────────────────────────────

/// `GET /base64`
pub async fn base64_page(session: Session) -> Html<String> {
    Html(views::render_text_tool(TextTool::Base64, &session.data.base64))
}

/// `POST /api/base64`
pub async fn base64(mut session: Session, Form(form): Form<TextToolForm>) -> Response {
    apply_base64(&mut session.data.base64, &form);
    redirect_with_session(&session, TextTool::Base64.page())
}

/// `GET /htmlencode`
pub async fn url_codec_page(session: Session) -> Html<String> {
    Html(views::render_text_tool(TextTool::UrlCodec, &session.data.url_codec))
}

/// `POST /api/htmlencode`
pub async fn url_codec(mut session: Session, Form(form): Form<TextToolForm>) -> Response {
    apply_url_codec(&mut session.data.url_codec, &form);
    redirect_with_session(&session, TextTool::UrlCodec.page())
}

/// `303` to `location`, persisting `session`.
///
/// If the cookie cannot be produced the redirect is still sent without it;
/// the next page then shows the previous session.
fn redirect_with_session(session: &Session, location: &str) -> Response {
    match session.set_cookie() {
        Ok(cookie) => (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(location)).into_response(),
        Err(e) => {
            error!("failed to write session cookie: {e}");
            Redirect::to(location).into_response()
        }
    }
}
