//! Per-submission pipeline: extract, decode, map, then dispatch.
//!
//! Rejections end the submission with a [`SubmissionError`]. Everything after
//! mapping only degrades it, and the caller gets its answer before any
//! archive or processing task has finished.
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use ingest::{Capture, ExtractedParts, MultipartForm};
use metrics::counter;
use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigError, PipelineConfig};
use crate::dispatch::{
    ArchiveError, CaptureProcessor, DispatchHandle, DispatchTask, ImageArchive, XmlArchive,
};
use crate::error::{Degradation, RejectionKind, SubmissionError};

/// Where a submission is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    PartsExtracted,
    XmlDecoded,
    Mapped,
    Dispatched,
    Rejected(RejectionKind),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Received => f.write_str("received"),
            Stage::PartsExtracted => f.write_str("parts_extracted"),
            Stage::XmlDecoded => f.write_str("xml_decoded"),
            Stage::Mapped => f.write_str("mapped"),
            Stage::Dispatched => f.write_str("dispatched"),
            Stage::Rejected(kind) => write!(f, "rejected({})", kind.as_str()),
        }
    }
}

/// What the submitter's response is logged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSummary {
    pub license_plate: String,
    pub direction: String,
    pub confidence: i32,
    pub vehicle_type: String,
    pub image_count: usize,
}

impl From<&Capture> for CaptureSummary {
    fn from(capture: &Capture) -> Self {
        Self {
            license_plate: capture.license_plate.clone(),
            direction: capture.direction.clone(),
            confidence: capture.confidence,
            vehicle_type: capture.vehicle_type.clone(),
            image_count: capture.images.len(),
        }
    }
}

/// A submission that made it through mapping.
#[derive(Debug)]
pub struct Accepted {
    pub summary: CaptureSummary,
    /// Degradations known at acknowledgement time. Dispatch failures show up
    /// later, through [`DispatchHandle::join`].
    pub degradations: Vec<Degradation>,
    pub dispatch: DispatchHandle,
}

/// Runs extraction, decoding and mapping for each submission, then hands the
/// capture to the collaborators without waiting for them.
///
/// Immutable once built; share it behind an `Arc` across request tasks.
pub struct IngestionOrchestrator {
    config: PipelineConfig,
    xml_archive: Arc<dyn XmlArchive>,
    image_archive: Arc<dyn ImageArchive>,
    processor: Arc<dyn CaptureProcessor>,
}

impl IngestionOrchestrator {
    pub fn new(
        config: PipelineConfig,
        xml_archive: Arc<dyn XmlArchive>,
        image_archive: Arc<dyn ImageArchive>,
        processor: Arc<dyn CaptureProcessor>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            xml_archive,
            image_archive,
            processor,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handle one submission. `form` is `None` when the request carried no
    /// multipart body.
    #[instrument(skip_all, fields(submitter = %submitter))]
    pub async fn ingest(
        &self,
        form: Option<MultipartForm>,
        submitter: &str,
    ) -> Result<Accepted, SubmissionError> {
        let started = Instant::now();
        transition(Stage::Received);

        match self.run(form, submitter).await {
            Ok(accepted) => {
                counter!("plategate_submissions_total", "outcome" => "accepted").increment(1);
                info!(
                    ip = %submitter,
                    license_plate = %accepted.summary.license_plate,
                    direction = %accepted.summary.direction,
                    confidence = accepted.summary.confidence,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "LPR event processed"
                );
                Ok(accepted)
            }
            Err(err) => {
                let kind = err.kind();
                transition(Stage::Rejected(kind));
                counter!("plategate_submissions_total", "outcome" => kind.as_str()).increment(1);
                warn!(ip = %submitter, error = %err, "submission rejected");
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        form: Option<MultipartForm>,
        submitter: &str,
    ) -> Result<Accepted, SubmissionError> {
        let form = form.ok_or(SubmissionError::MissingForm)?;

        let ExtractedParts { xml, images } = ingest::extract(form, &self.config.parts).await?;
        transition(Stage::PartsExtracted);

        let event = anpr::decode(&xml)?;
        transition(Stage::XmlDecoded);

        let mut degradations = Vec::new();
        let images = images.unwrap_or_else(|err| {
            let degradation = Degradation::ImageExtraction(err);
            record(&degradation);
            degradations.push(degradation);
            Vec::new()
        });

        let mut capture = ingest::map_event(&event, Utc::now());
        capture.attach_images(images);
        // decode succeeded, so the bytes are valid UTF-8
        capture.attach_xml(String::from_utf8_lossy(&xml).into_owned());
        transition(Stage::Mapped);

        let summary = CaptureSummary::from(&capture);
        let dispatch = self.dispatch(capture, submitter);
        transition(Stage::Dispatched);

        Ok(Accepted {
            summary,
            degradations,
            dispatch,
        })
    }

    fn dispatch(&self, capture: Capture, submitter: &str) -> DispatchHandle {
        let mut handle = DispatchHandle::default();

        if self.config.save_xml {
            let archive = Arc::clone(&self.xml_archive);
            let xml = capture.xml_data.clone();
            let plate = capture.license_plate.clone();
            let submitter = submitter.to_string();
            handle.push(
                DispatchTask::XmlArchive,
                tokio::spawn(async move {
                    let result = archive.save_xml(&xml, &plate, &submitter).await;
                    settle_archive(DispatchTask::XmlArchive, result)
                }),
            );
        }

        if self.config.save_images && !capture.images.is_empty() {
            let archive = Arc::clone(&self.image_archive);
            let images = capture.images.clone();
            let submitter = submitter.to_string();
            handle.push(
                DispatchTask::ImageArchive,
                tokio::spawn(async move {
                    let result = archive.save_images(&images, &submitter).await;
                    settle_archive(DispatchTask::ImageArchive, result)
                }),
            );
        }

        let processor = Arc::clone(&self.processor);
        let timeout = self.config.processing_timeout();
        handle.push(
            DispatchTask::Processing,
            tokio::spawn(run_processor(processor, capture, timeout)),
        );

        handle
    }
}

async fn run_processor(
    processor: Arc<dyn CaptureProcessor>,
    capture: Capture,
    timeout: Duration,
) -> Option<Degradation> {
    let degradation = match tokio::time::timeout(timeout, processor.process(capture)).await {
        Ok(Ok(())) => return None,
        Ok(Err(err)) => Degradation::ProcessingFailed(err),
        Err(_) => {
            counter!("plategate_processing_timeouts_total").increment(1);
            Degradation::ProcessingTimedOut(timeout)
        }
    };
    record(&degradation);
    Some(degradation)
}

fn settle_archive(
    task: DispatchTask,
    result: Result<(), ArchiveError>,
) -> Option<Degradation> {
    let error = result.err()?;
    let degradation = Degradation::ArchiveFailed { task, error };
    record(&degradation);
    Some(degradation)
}

fn record(degradation: &Degradation) {
    counter!("plategate_degradations_total", "kind" => degradation.kind()).increment(1);
    warn!(kind = degradation.kind(), error = %degradation, "submission degraded");
}

fn transition(stage: Stage) {
    debug!(stage = %stage, "stage transition");
}
