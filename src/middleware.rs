use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};

/// Middleware that logs one line per request
///
/// Records the method, path, final status and elapsed time. Streaming bodies
/// are still in flight when the line is written, so the duration covers the
/// handler and response headers only.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = whole_millis(started.elapsed());
    if status.is_server_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %path, status = status.as_u16(), elapsed_ms, "request handled");
    }

    response
}

/// Milliseconds in `elapsed`, saturating instead of wrapping
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_millis() {
        assert_eq!(whole_millis(Duration::from_micros(1_999)), 1);
        assert_eq!(whole_millis(Duration::from_secs(90)), 90_000);
    }

    #[test]
    fn test_whole_millis_saturates() {
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }
}
