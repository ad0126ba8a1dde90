//! Signed cookie session store.
//!
//! The whole [`SessionData`] record travels in one cookie.  Nothing is kept
//! on the server, so any instance holding the same key can serve any client.
//!
//! # Cookie value format
//!
//! ```text
//! base64url(json(payload)) "." base64url(HMAC-SHA256(key, first part))
//!
//! payload = { "iat": <unix seconds when written>, "data": SessionData }
//! ```
//!
//! Both parts use the URL-safe alphabet without padding, so the value needs
//! no quoting inside a `Cookie` header.  A cookie whose signature does not
//! match, whose payload does not parse, or whose `iat` is older than the
//! configured max age is treated as an empty session.  The client is never
//! told why; the reason is logged at `debug`.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, HeaderValue, COOKIE};
use axum::http::request::Parts;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{SessionConfig, SessionData};
use crate::infrastructure::http_server::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Browsers commonly drop cookies larger than this.
pub const MAX_COOKIE_BYTES: usize = 4096;

// ── Error type ────────────────────────────────────────────────────────────────

/// Why a cookie value was not accepted as a session.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    /// The value is not `<payload>.<signature>`.
    #[error("malformed session cookie")]
    Malformed,

    /// The signature does not match the payload under our key.
    #[error("session signature mismatch")]
    BadSignature,

    /// The signed payload could not be decoded.
    #[error("invalid session payload: {0}")]
    InvalidPayload(String),

    /// The session was written longer ago than the max age allows.
    #[error("session expired {0} s ago")]
    Expired(u64),

    /// The session could not be serialized (never expected for plain strings).
    #[error("failed to encode session: {0}")]
    Encode(String),
}

#[derive(Serialize, Deserialize)]
struct SignedPayload {
    iat: u64,
    data: SessionData,
}

// ── Signer ────────────────────────────────────────────────────────────────────

/// Signs and verifies session cookies with one key.
pub struct SessionSigner {
    config: SessionConfig,
}

impl SessionSigner {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn max_age(&self) -> Duration {
        self.config.max_age
    }

    /// Produces the cookie value for `data`, stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Encode`] if the payload cannot be serialized.
    pub fn sign(&self, data: &SessionData, now: SystemTime) -> Result<String, SessionError> {
        let payload = SignedPayload {
            iat: unix_seconds(now),
            data: data.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(|e| SessionError::Encode(e.to_string()))?;
        let body = URL_SAFE_NO_PAD.encode(json);
        let mac = self
            .mac(body.as_bytes())
            .map_err(|e| SessionError::Encode(e.to_string()))?;
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{body}.{signature}"))
    }

    /// Checks the signature and age of `value` and returns the session it
    /// carries.
    ///
    /// # Errors
    ///
    /// Any [`SessionError`] other than `Encode`.
    pub fn verify(&self, value: &str, now: SystemTime) -> Result<SessionData, SessionError> {
        let (body, signature) = value.split_once('.').ok_or(SessionError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionError::Malformed)?;

        // `verify_slice` compares in constant time.
        self.mac(body.as_bytes())
            .map_err(|_| SessionError::BadSignature)?
            .verify_slice(&signature)
            .map_err(|_| SessionError::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|e| SessionError::InvalidPayload(e.to_string()))?;
        let payload: SignedPayload = serde_json::from_slice(&json)
            .map_err(|e| SessionError::InvalidPayload(e.to_string()))?;

        let age = unix_seconds(now).saturating_sub(payload.iat);
        let max_age = self.config.max_age.as_secs();
        if age > max_age {
            return Err(SessionError::Expired(age - max_age));
        }
        Ok(payload.data)
    }

    /// Builds the `Set-Cookie` header value that stores `data`.
    ///
    /// Logs a warning when the cookie exceeds [`MAX_COOKIE_BYTES`]; the
    /// header is still sent and the browser may drop it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Encode`] if the value cannot be produced or is
    /// not a legal header value.
    pub fn set_cookie_header(
        &self,
        data: &SessionData,
        now: SystemTime,
    ) -> Result<HeaderValue, SessionError> {
        let value = self.sign(data, now)?;
        let cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.config.cookie_name,
            value,
            self.config.max_age.as_secs()
        );
        if cookie.len() > MAX_COOKIE_BYTES {
            warn!(
                bytes = cookie.len(),
                limit = MAX_COOKIE_BYTES,
                "session cookie exceeds the usual browser limit and may be dropped"
            );
        }
        HeaderValue::from_str(&cookie).map_err(|e| SessionError::Encode(e.to_string()))
    }

    /// Finds this signer's cookie in `headers` and returns its session, or an
    /// empty session when the cookie is absent or rejected.
    pub fn load(&self, headers: &HeaderMap, now: SystemTime) -> SessionData {
        let Some(value) = find_cookie(headers, &self.config.cookie_name) else {
            return SessionData::default();
        };
        match self.verify(value, now) {
            Ok(data) => data,
            Err(e) => {
                debug!("ignoring session cookie: {e}");
                SessionData::default()
            }
        }
    }

    fn mac(&self, body: &[u8]) -> Result<HmacSha256, hmac::digest::InvalidLength> {
        let mut mac = HmacSha256::new_from_slice(&self.config.secret_key)?;
        mac.update(body);
        Ok(mac)
    }
}

/// Returns the value of the first cookie called `name` across all `Cookie`
/// headers.
fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

fn unix_seconds(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

// ── Extractor ─────────────────────────────────────────────────────────────────

/// The current request's session, loaded from its cookie.
///
/// Handlers take it as an argument, mutate [`Session::data`], and call
/// [`Session::set_cookie`] to get the header that persists the change.
/// Extraction never fails: a missing or invalid cookie yields an empty
/// session.
pub struct Session {
    pub data: SessionData,
    signer: Arc<SessionSigner>,
}

impl Session {
    /// `Set-Cookie` header value for the current contents.
    ///
    /// # Errors
    ///
    /// See [`SessionSigner::set_cookie_header`].
    pub fn set_cookie(&self) -> Result<HeaderValue, SessionError> {
        self.signer.set_cookie_header(&self.data, SystemTime::now())
    }
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let signer = Arc::clone(&state.signer);
        let data = signer.load(&parts.headers, SystemTime::now());
        Ok(Session { data, signer })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
