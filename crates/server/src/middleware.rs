use axum::extract::{ConnectInfo, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    // Generate or extract request ID
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    // Add to request extensions for handlers to access
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Logging middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_default();

    tracing::debug!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

/// Address of the camera that sent the request.
///
/// Taken from the first `X-Forwarded-For` hop, then `X-Real-IP`, then the TCP
/// peer. Falls back to `"unknown"` when none is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterAddr(pub String);

impl<S> FromRequestParts<S> for SubmitterAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let forwarded = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let addr = forwarded
            .or_else(|| header("x-real-ip"))
            .map(str::to_string)
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| "unknown".to_string());

        Ok(SubmitterAddr(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn submitter(request: HttpRequest<()>) -> String {
        let (mut parts, _) = request.into_parts();
        let SubmitterAddr(addr) = SubmitterAddr::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        addr
    }

    #[tokio::test]
    async fn forwarded_for_wins() {
        let request = HttpRequest::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(submitter(request).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn real_ip_then_peer() {
        let request = HttpRequest::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(submitter(request).await, "198.51.100.2");

        let mut request = HttpRequest::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 64], 50123))));
        assert_eq!(submitter(request).await, "192.168.1.64");
    }

    #[tokio::test]
    async fn unknown_without_any_source() {
        let request = HttpRequest::builder().body(()).unwrap();
        assert_eq!(submitter(request).await, "unknown");
    }
}
