//! HTTP Middleware
//!
//! Logging for failures that never went through `ApiError`: request timeouts,
//! method mismatches and other framework-level rejections.

use axum::{extract::Request, middleware::Next, response::Response};

use super::error::ErrorLogged;

/// Log 4xx/5xx responses that carry no [`ErrorLogged`] marker
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    if response.extensions().get::<ErrorLogged>().is_some() {
        return response;
    }

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%method, path, status = status.as_u16(), "Unhandled error response");
    } else if status.is_client_error() {
        tracing::warn!(%method, path, status = status.as_u16(), "Unhandled error response");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::error::ApiError;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::util::ServiceExt;
    use tower_http::timeout::TimeoutLayer;

    /// Collects formatted log lines for inspection
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    async fn missing_item() -> ApiError {
        ApiError::NotFound("Item not found.".to_string())
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    async fn broken() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn router() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/item/1", get(missing_item))
            .route("/slow", get(slow))
            .route("/broken", get(broken))
            .layer(TimeoutLayer::new(Duration::from_millis(20)))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    /// Send one request with a capturing subscriber installed
    async fn send(method: &str, uri: &str) -> (StatusCode, String) {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let status = router().oneshot(request).await.unwrap().status();
        (status, logs.contents())
    }

    #[tokio::test]
    async fn test_success_is_silent() {
        let (status, logs) = send("GET", "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_is_logged_once() {
        let (status, logs) = send("GET", "/item/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(logs.matches("Request rejected").count(), 1);
        assert!(!logs.contains("Unhandled error response"));
    }

    #[tokio::test]
    async fn test_timeout_is_logged_here() {
        let (status, logs) = send("GET", "/slow").await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert!(logs.contains("Unhandled error response"));
        assert!(logs.contains("WARN"));
    }

    #[tokio::test]
    async fn test_method_mismatch_is_logged_here() {
        let (status, logs) = send("POST", "/ping").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(logs.contains("Unhandled error response"));
    }

    #[tokio::test]
    async fn test_bare_server_error_is_logged_here() {
        let (status, logs) = send("GET", "/broken").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Unhandled error response"));
    }
}
