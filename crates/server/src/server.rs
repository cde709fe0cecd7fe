//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration for the camera endpoint and probes
//! - Middleware stack (request ID, logging, timeout, body limit)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, health, lpr, not_found};
use crate::state::ServerState;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Middleware stack (applied in reverse order):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. Timeout handling
/// 4. Body size limit (camera endpoint only)
pub fn build_router(state: Arc<ServerState>) -> Router {
    let probe_routes = Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics));

    let camera_routes = Router::new()
        .route(&state.config.endpoint_path, post(lpr::receive_event))
        .layer(DefaultBodyLimit::max(state.config.max_body_size()));

    Router::new()
        .merge(probe_routes)
        .merge(camera_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.timeout(),
        ))
        .layer(from_fn(request_id))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the plategate HTTP server
///
/// Initializes the server with the provided configuration and starts listening
/// for camera submissions. This function will block until the server is shut
/// down via SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
///
/// # Shutdown
///
/// The server handles graceful shutdown on:
/// - SIGTERM (Unix/Linux)
/// - Ctrl+C (all platforms)
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let state = Arc::new(ServerState::new(config.clone())?);
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting plategate server on {} (endpoint {})",
        addr,
        config.endpoint_path
    );
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    tracing::info!(
        "Storage: {}, save_xml: {}, save_images: {}, processing timeout: {}ms",
        config.storage_dir.display(),
        config.pipeline.save_xml,
        config.pipeline.save_images,
        config.pipeline.processing_timeout_ms
    );
    tracing::info!("Metrics: {}", config.metrics_enabled);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
