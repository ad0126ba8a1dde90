//! docbridge web server: entry point.
//!
//! Serves the converter and text tool pages, keeping each browser's last
//! result in a signed cookie.
//!
//! # Usage
//!
//! ```text
//! docbridge-web --secret-key <KEY> [OPTIONS]
//!
//! Options:
//!   --listen <ADDR>                Listen address [default: 127.0.0.1:3000]
//!   --secret-key <KEY>             Session signing key (required)
//!   --session-cookie-name <NAME>   Session cookie name [default: session]
//!   --session-max-age <SECS>       Session lifetime [default: 604800]
//!   --max-body-bytes <BYTES>       Request body limit [default: 1048576]
//!   --log-format <text|json>       Log output format [default: text]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable                   | Default          | Description             |
//! |----------------------------|------------------|-------------------------|
//! | `DOCBRIDGE_LISTEN`         | `127.0.0.1:3000` | Listen address          |
//! | `SECRET_KEY`               | *(none)*         | Session signing key     |
//! | `SESSION_COOKIE_NAME`      | `session`        | Session cookie name     |
//! | `SESSION_MAX_AGE`          | `604800`         | Session lifetime (secs) |
//! | `DOCBRIDGE_MAX_BODY_BYTES` | `1048576`        | Request body limit      |
//! | `DOCBRIDGE_LOG_FORMAT`     | `text`           | `text` or `json`        |
//!
//! The log level is read from `RUST_LOG` (default `info`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use docbridge_web::domain::{SessionConfig, WebConfig};
use docbridge_web::infrastructure::run_server;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON / YAML / TOML converter and text tools, served over HTTP.
#[derive(Debug, Parser)]
#[command(
    name = "docbridge-web",
    about = "Browser-based JSON/YAML/TOML converter with Base64 and URL tools",
    version
)]
struct Cli {
    /// Address and port to listen on.
    ///
    /// Use `0.0.0.0:3000` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1:3000", env = "DOCBRIDGE_LISTEN")]
    listen: String,

    /// Key used to sign session cookies.  Required and must not be empty.
    #[arg(long, default_value = "", env = "SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    /// Name of the session cookie.
    #[arg(long, default_value = "session", env = "SESSION_COOKIE_NAME")]
    session_cookie_name: String,

    /// Session lifetime in seconds.
    #[arg(long, default_value_t = 604_800, env = "SESSION_MAX_AGE")]
    session_max_age: u64,

    /// Largest accepted request body in bytes.
    #[arg(long, default_value_t = 1_048_576, env = "DOCBRIDGE_MAX_BODY_BYTES")]
    max_body_bytes: usize,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "DOCBRIDGE_LOG_FORMAT")]
    log_format: LogFormat,
}

impl Cli {
    /// Converts the parsed CLI arguments into a validated [`WebConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--listen` is not a socket address, or if the
    /// resulting config fails [`WebConfig::validate`] (empty secret key,
    /// invalid cookie name, zero max age).
    fn into_web_config(self) -> anyhow::Result<WebConfig> {
        let listen_addr: SocketAddr = self
            .listen
            .parse()
            .with_context(|| format!("invalid listen address: '{}'", self.listen))?;

        let config = WebConfig {
            listen_addr,
            session: SessionConfig {
                cookie_name: self.session_cookie_name,
                secret_key: self.secret_key.into_bytes(),
                max_age: Duration::from_secs(self.session_max_age),
            },
            max_body_bytes: self.max_body_bytes,
        };
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}

/// Resolves on Ctrl+C.  If the signal handler cannot be installed the error
/// is logged and the server keeps running.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            error!("failed to listen for Ctrl+C signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

/// Program entry point.
///
/// 1. Parse CLI arguments (with environment fallbacks).
/// 2. Initialise `tracing` in the requested format.
/// 3. Build and validate the [`WebConfig`].
/// 4. Serve until Ctrl+C, then let in-flight requests finish.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config = cli.into_web_config()?;

    info!(
        listen = %config.listen_addr,
        cookie = %config.session.cookie_name,
        max_age_secs = config.session.max_age.as_secs(),
        "docbridge web server starting"
    );

    run_server(config, shutdown_signal()).await?;

    info!("docbridge web server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};

    /// The CLI with every `env = "..."` fallback removed, so variables
    /// exported on the test machine cannot change what the tests parse.
    fn command_without_env() -> clap::Command {
        let mut cmd = Cli::command();
        let ids: Vec<_> = cmd.get_arguments().map(|a| a.get_id().clone()).collect();
        for id in ids {
            cmd = cmd.mut_arg(id, |arg| arg.env(None::<&'static str>));
        }
        cmd
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["docbridge-web"];
        argv.extend_from_slice(args);
        let matches = command_without_env().try_get_matches_from(argv).unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_command_without_env_reads_no_variables() {
        assert!(command_without_env()
            .get_arguments()
            .all(|a| a.get_env().is_none()));
    }

    #[test]
    fn test_cli_declares_env_fallbacks() {
        let cmd = Cli::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("listen").as_deref(), Some("DOCBRIDGE_LISTEN"));
        assert_eq!(env_of("secret_key").as_deref(), Some("SECRET_KEY"));
        assert_eq!(env_of("session_cookie_name").as_deref(), Some("SESSION_COOKIE_NAME"));
    }

    #[test]
    fn test_cli_default_listen() {
        let cli = parse(&[]);
        assert_eq!(cli.listen, "127.0.0.1:3000");
    }

    #[test]
    fn test_cli_default_cookie_name() {
        let cli = parse(&[]);
        assert_eq!(cli.session_cookie_name, "session");
    }

    #[test]
    fn test_cli_default_max_age_is_seven_days() {
        let cli = parse(&[]);
        assert_eq!(cli.session_max_age, 604_800);
    }

    #[test]
    fn test_cli_default_log_format_is_text() {
        let cli = parse(&[]);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_cli_log_format_json() {
        let cli = parse(&["--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cli_listen_override() {
        let cli = parse(&["--listen", "0.0.0.0:8080"]);
        assert_eq!(cli.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_into_web_config_with_secret() {
        // Arrange
        let cli = parse(&["--secret-key", "k"]);

        // Act
        let config = cli.into_web_config().unwrap();

        // Assert
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.session.secret_key, b"k");
        assert_eq!(config.session.max_age, Duration::from_secs(604_800));
        assert_eq!(config.max_body_bytes, 1_048_576);
    }

    #[test]
    fn test_into_web_config_custom_values() {
        let cli = parse(&[
            "--secret-key",
            "k",
            "--listen",
            "0.0.0.0:8080",
            "--session-cookie-name",
            "docbridge",
            "--session-max-age",
            "60",
            "--max-body-bytes",
            "4096",
        ]);

        let config = cli.into_web_config().unwrap();

        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.session.cookie_name, "docbridge");
        assert_eq!(config.session.max_age, Duration::from_secs(60));
        assert_eq!(config.max_body_bytes, 4096);
    }

    #[test]
    fn test_into_web_config_empty_secret_returns_error() {
        // Arrange: no --secret-key given
        let cli = Cli {
            listen: "127.0.0.1:3000".to_string(),
            secret_key: String::new(),
            session_cookie_name: "session".to_string(),
            session_max_age: 604_800,
            max_body_bytes: 1_048_576,
            log_format: LogFormat::Text,
        };

        // Act
        let result = cli.into_web_config();

        // Assert: must return an error, not panic
        assert!(result.is_err());
    }

    #[test]
    fn test_into_web_config_invalid_listen_returns_error() {
        let cli = Cli {
            listen: "not-an-address".to_string(),
            secret_key: "k".to_string(),
            session_cookie_name: "session".to_string(),
            session_max_age: 604_800,
            max_body_bytes: 1_048_576,
            log_format: LogFormat::Text,
        };

        assert!(cli.into_web_config().is_err());
    }
}
