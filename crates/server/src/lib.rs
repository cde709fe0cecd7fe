//! plategate server - HTTP endpoint for LPR camera event submissions
//!
//! Cameras POST one multipart submission per plate read: an `anpr.xml` event
//! plus up to two pictures. This crate turns the request into an
//! [`ingest::MultipartForm`], runs it through the
//! [`plategate::IngestionOrchestrator`] and answers with a small JSON
//! acknowledgement. Archiving and processing happen after the response.
//!
//! # Features
//!
//! - **Filesystem archive**: Raw XML and images written under a storage root
//! - **Middleware**: Request ID tracking, structured logging, timeouts, body limit
//! - **Configuration**: `.env`, optional `server.*` file, `PLATEGATE_SERVER__*` variables
//! - **Error Handling**: Uniform `{"error": {...}}` bodies with status and code
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `POST /api/v1/lpr/events` - Camera submissions (path configurable)
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod archive;
pub mod config;
pub mod error;
pub mod middleware;
pub mod processor;
pub mod routes;
pub mod server;
pub mod state;

pub use archive::FsArchive;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use processor::LoggingProcessor;
pub use server::{build_router, start_server};
pub use state::ServerState;
