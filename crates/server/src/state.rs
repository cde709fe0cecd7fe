use crate::archive::FsArchive;
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::processor::LoggingProcessor;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use plategate::{CaptureProcessor, ImageArchive, IngestionOrchestrator, XmlArchive};
use std::sync::Arc;

/// Process-wide Prometheus recorder, installed on first use
static PROMETHEUS: OnceCell<Option<PrometheusHandle>> = OnceCell::new();

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Ingestion pipeline (shared across requests)
    pub orchestrator: Arc<IngestionOrchestrator>,

    /// Prometheus handle, present when metrics are enabled and the recorder
    /// could be installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create state backed by the filesystem archive and the logging processor
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let archive = Arc::new(FsArchive::new(config.storage_dir.clone()));
        Self::with_collaborators(
            config,
            archive.clone(),
            archive,
            Arc::new(LoggingProcessor),
        )
    }

    /// Create state with explicit collaborators
    pub fn with_collaborators(
        config: ServerConfig,
        xml_archive: Arc<dyn XmlArchive>,
        image_archive: Arc<dyn ImageArchive>,
        processor: Arc<dyn CaptureProcessor>,
    ) -> ServerResult<Self> {
        let orchestrator = IngestionOrchestrator::new(
            config.pipeline.clone(),
            xml_archive,
            image_archive,
            processor,
        )?;

        let metrics = if config.metrics_enabled {
            prometheus_handle()
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            metrics,
        })
    }
}

fn prometheus_handle() -> Option<PrometheusHandle> {
    PROMETHEUS
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(error = %err, "failed to install prometheus recorder");
                None
            }
        })
        .clone()
}
