//! Web server configuration types.
//!
//! [`WebConfig`] is the single source of truth for all runtime settings.  It
//! is built once in `main.rs` from CLI arguments (or their environment
//! variable fallbacks) and validated before the server starts.
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! reads in here) makes the server easy to start from tests with whatever
//! settings a test needs.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Default listen address (loopback only).
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Default name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "session";

/// Default session lifetime: seven days.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default cap on request bodies: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Reasons a [`WebConfig`] is rejected at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// No signing key was configured.  Unsigned or empty-key sessions would
    /// let any client forge session contents, so the server refuses to start.
    #[error("a non-empty session secret key is required (set --secret-key or SECRET_KEY)")]
    MissingSecretKey,

    /// The cookie name is empty or contains characters not allowed in a
    /// cookie name token.
    #[error("invalid session cookie name '{0}'")]
    InvalidCookieName(String),

    /// A zero max age would expire every session immediately.
    #[error("session max age must be at least one second")]
    ZeroSessionMaxAge,
}

/// Settings for the signed session cookie.
#[derive(Clone)]
pub struct SessionConfig {
    /// Name of the cookie that carries the session.
    pub cookie_name: String,

    /// HMAC key used to sign and verify the cookie.
    pub secret_key: Vec<u8>,

    /// How long a session stays valid after it was last written.  Used both
    /// as the cookie `Max-Age` and as the server-side expiry check.
    pub max_age: Duration,
}

// Never print the key, not even in debug logs.
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("secret_key", &"<redacted>")
            .field("max_age", &self.max_age)
            .finish()
    }
}

/// All runtime configuration for the web server.
///
/// # Example
///
/// ```rust
/// use docbridge_web::domain::WebConfig;
///
/// let cfg = WebConfig::with_secret("change-me");
/// assert_eq!(cfg.listen_addr.port(), 3000);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address and port the HTTP listener binds to.
    pub listen_addr: SocketAddr,

    /// Session cookie settings.
    pub session: SessionConfig,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl WebConfig {
    /// Returns a config with every default applied and the given signing key.
    pub fn with_secret(secret_key: impl Into<String>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session: SessionConfig {
                cookie_name: DEFAULT_COOKIE_NAME.to_string(),
                secret_key: secret_key.into().into_bytes(),
                max_age: DEFAULT_SESSION_MAX_AGE,
            },
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Checks the invariants the server relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret_key.is_empty() {
            return Err(ConfigError::MissingSecretKey);
        }
        if !is_cookie_name_token(&self.session.cookie_name) {
            return Err(ConfigError::InvalidCookieName(
                self.session.cookie_name.clone(),
            ));
        }
        if self.session.max_age.as_secs() == 0 {
            return Err(ConfigError::ZeroSessionMaxAge);
        }
        Ok(())
    }
}

/// RFC 6265 cookie-name: a non-empty HTTP token.
fn is_cookie_name_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_uses_default_listen_addr() {
        let cfg = WebConfig::with_secret("k");
        assert_eq!(cfg.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn test_with_secret_uses_default_cookie_name() {
        let cfg = WebConfig::with_secret("k");
        assert_eq!(cfg.session.cookie_name, "session");
    }

    #[test]
    fn test_default_max_age_is_seven_days() {
        let cfg = WebConfig::with_secret("k");
        assert_eq!(cfg.session.max_age, Duration::from_secs(604_800));
    }

    #[test]
    fn test_validate_accepts_defaults_with_secret() {
        assert_eq!(WebConfig::with_secret("k").validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        // Arrange
        let cfg = WebConfig::with_secret("");

        // Act / Assert
        assert_eq!(cfg.validate(), Err(ConfigError::MissingSecretKey));
    }

    #[test]
    fn test_validate_rejects_cookie_name_with_separator() {
        let mut cfg = WebConfig::with_secret("k");
        cfg.session.cookie_name = "my session;".to_string();

        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidCookieName("my session;".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_cookie_name() {
        let mut cfg = WebConfig::with_secret("k");
        cfg.session.cookie_name = String::new();

        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidCookieName(_))));
    }

    #[test]
    fn test_validate_rejects_zero_max_age() {
        let mut cfg = WebConfig::with_secret("k");
        cfg.session.max_age = Duration::ZERO;

        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSessionMaxAge));
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let cfg = WebConfig::with_secret("super-secret-value");

        let printed = format!("{cfg:?}");

        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("<redacted>"));
    }
}
