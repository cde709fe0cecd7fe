//! Downstream collaborators and the fire-and-forget tasks that drive them.
//!
//! Once a submission is mapped, the orchestrator spawns one task per enabled
//! collaborator and returns immediately. The [`DispatchHandle`] it hands back
//! can be dropped (tasks keep running) or joined with a deadline.
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ingest::{Capture, Image};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::error::Degradation;

/// Failure reported by an archive collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArchiveError {
    #[error("failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("archive unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by the processing collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProcessError {
    #[error("processing failed: {0}")]
    Failed(String),
}

/// Persists the verbatim XML of a submission.
#[async_trait]
pub trait XmlArchive: Send + Sync {
    async fn save_xml(
        &self,
        xml: &str,
        license_plate: &str,
        submitter: &str,
    ) -> Result<(), ArchiveError>;
}

/// Persists the images of a submission.
#[async_trait]
pub trait ImageArchive: Send + Sync {
    async fn save_images(&self, images: &[Image], submitter: &str) -> Result<(), ArchiveError>;
}

/// Downstream consumer of finished captures.
#[async_trait]
pub trait CaptureProcessor: Send + Sync {
    async fn process(&self, capture: Capture) -> Result<(), ProcessError>;
}

/// Which collaborator a dispatched task drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchTask {
    XmlArchive,
    ImageArchive,
    Processing,
}

impl DispatchTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchTask::XmlArchive => "xml_archive",
            DispatchTask::ImageArchive => "image_archive",
            DispatchTask::Processing => "processing",
        }
    }
}

impl fmt::Display for DispatchTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks spawned for one submission.
#[derive(Debug, Default)]
pub struct DispatchHandle {
    tasks: Vec<(DispatchTask, JoinHandle<Option<Degradation>>)>,
}

impl DispatchHandle {
    pub(crate) fn push(&mut self, task: DispatchTask, handle: JoinHandle<Option<Degradation>>) {
        self.tasks.push((task, handle));
    }

    /// Collaborators that were started, in spawn order.
    pub fn tasks(&self) -> impl Iterator<Item = DispatchTask> + '_ {
        self.tasks.iter().map(|(task, _)| *task)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait up to `wait` for every task. Tasks still running at the deadline
    /// are left detached and listed as unfinished.
    pub async fn join(self, wait: Duration) -> DispatchReport {
        let deadline = Instant::now() + wait;
        let mut report = DispatchReport::default();

        for (task, handle) in self.tasks {
            match tokio::time::timeout_at(deadline, handle).await {
                Ok(Ok(None)) => {
                    debug!(task = %task, "dispatch task finished");
                    report.completed.push(task);
                }
                Ok(Ok(Some(degradation))) => {
                    report.completed.push(task);
                    report.degradations.push(degradation);
                }
                Ok(Err(err)) => {
                    error!(task = %task, error = %err, "dispatch task panicked");
                    report.degradations.push(Degradation::TaskAborted {
                        task,
                        reason: err.to_string(),
                    });
                }
                Err(_) => {
                    warn!(task = %task, "dispatch task did not finish before deadline");
                    report.unfinished.push(task);
                }
            }
        }

        report
    }
}

/// Outcome of [`DispatchHandle::join`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Tasks that ran to the end, with or without a degradation.
    pub completed: Vec<DispatchTask>,
    pub degradations: Vec<Degradation>,
    pub unfinished: Vec<DispatchTask>,
}

impl DispatchReport {
    /// Every task finished and none degraded.
    pub fn is_clean(&self) -> bool {
        self.degradations.is_empty() && self.unfinished.is_empty()
    }
}
