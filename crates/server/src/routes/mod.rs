//! API route handlers
//!
//! - `health`: Health checks, readiness, and metrics
//! - `lpr`: Camera event submissions

pub mod health;
pub mod lpr;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// API version and base info
///
/// # Response
///
/// ```json
/// {
///   "name": "plategate",
///   "version": "0.1.0",
///   "api_version": "v1",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "plategate",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            state.config.endpoint_path,
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
