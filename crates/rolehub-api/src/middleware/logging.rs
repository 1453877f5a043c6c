//! Access logging.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info, warn};

/// One event per request. Server errors are logged at `warn` (the handler
/// already logged the cause); liveness probes on `/` at `debug`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(%method, %path, status, elapsed_ms, "Request failed");
    } else if path == "/" {
        debug!(%method, %path, status, elapsed_ms, "Liveness probe");
    } else {
        info!(%method, %path, status, elapsed_ms, "Request handled");
    }

    response
}
