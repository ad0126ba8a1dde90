//! Access log middleware: one line per request.
//!
//! Logged fields: `client` (peer IP, `-` when the router runs without
//! connect info, as in tests), `req_bytes` (declared `Content-Length`, `0`
//! when absent), `status` and `latency_ms`, with `"{method} {path}"` as the
//! message.  The query string is never logged.
//!
//! Requests refused by the body limit (`413`) are logged at `warn` so an
//! undersized `--max-body-bytes` shows up without raising the log level.
//! There is no user field: the tools are anonymous.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::http::header::CONTENT_LENGTH;
use axum::http::StatusCode;
use axum::response::Response;
use tracing::{info, warn};

#[derive(Clone, Copy, Default)]
pub struct AccessLogLayer;

impl<S> tower::Layer<S> for AccessLogLayer {
    type Service = AccessLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogService { inner }
    }
}

#[derive(Clone)]
pub struct AccessLogService<S> {
    inner: S,
}

impl<S> tower::Service<Request> for AccessLogService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        let client = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string())
            .unwrap_or_else(|| "-".to_owned());
        let req_bytes = declared_length(&req);
        let t0 = Instant::now();

        // Swap in the clone so the instance that was polled ready is the one
        // that gets called.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let response = inner.call(req).await?;
            let latency_ms = t0.elapsed().as_millis() as u64;
            let status = response.status();
            if status == StatusCode::PAYLOAD_TOO_LARGE {
                warn!(
                    client,
                    req_bytes,
                    status = status.as_u16(),
                    latency_ms,
                    "{method} {path}: body over limit"
                );
            } else {
                info!(client, req_bytes, status = status.as_u16(), latency_ms, "{method} {path}");
            }
            Ok(response)
        })
    }
}

/// `Content-Length` of `req`, or `0` when absent or unparsable.
fn declared_length(req: &Request) -> u64 {
    req.headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use std::convert::Infallible;
    use tower::{Layer, ServiceExt};

    #[test]
    fn test_declared_length_reads_content_length() {
        let req = Request::builder()
            .header(CONTENT_LENGTH, "42")
            .body(Body::empty())
            .unwrap();

        assert_eq!(declared_length(&req), 42);
    }

    #[test]
    fn test_declared_length_defaults_to_zero() {
        let missing = Request::builder().body(Body::empty()).unwrap();
        let garbage = Request::builder()
            .header(CONTENT_LENGTH, "lots")
            .body(Body::empty())
            .unwrap();

        assert_eq!(declared_length(&missing), 0);
        assert_eq!(declared_length(&garbage), 0);
    }

    #[tokio::test]
    async fn test_layer_passes_response_through() {
        // Arrange: an inner service that always answers 413
        let inner = tower::service_fn(|_req: Request| async {
            let mut resp = Response::new(Body::empty());
            *resp.status_mut() = StatusCode::PAYLOAD_TOO_LARGE;
            Ok::<_, Infallible>(resp)
        });
        let svc = AccessLogLayer.layer(inner);

        // Act
        let resp = svc
            .oneshot(Request::builder().uri("/api/converter").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
