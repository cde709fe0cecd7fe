use std::time::Duration;

use anpr::DecodeError;
use ingest::ExtractError;
use thiserror::Error;

use crate::dispatch::{ArchiveError, DispatchTask, ProcessError};

/// Why a submission was turned away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmissionError {
    /// The request carried no multipart body at all.
    #[error("multipart form data required")]
    MissingForm,

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("xml decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Coarse outcome class shown to the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// Malformed or incomplete submission.
    BadRequest,
    /// Local I/O or stream failure.
    InternalError,
}

impl RejectionKind {
    pub fn status_code(&self) -> u16 {
        match self {
            RejectionKind::BadRequest => 400,
            RejectionKind::InternalError => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RejectionKind::BadRequest => "BAD_REQUEST",
            RejectionKind::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Label used on the `outcome` metric dimension.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::BadRequest => "bad_request",
            RejectionKind::InternalError => "internal_error",
        }
    }
}

impl SubmissionError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            SubmissionError::MissingForm => RejectionKind::BadRequest,
            SubmissionError::Extract(ExtractError::MissingRequiredPart(_)) => {
                RejectionKind::BadRequest
            }
            SubmissionError::Extract(_) => RejectionKind::InternalError,
            SubmissionError::Decode(_) => RejectionKind::BadRequest,
        }
    }

    /// Message safe to return to the camera. Never names the failing stage
    /// beyond what the camera can fix.
    pub fn public_message(&self) -> String {
        match self {
            SubmissionError::MissingForm => "multipart form data required".to_string(),
            SubmissionError::Extract(ExtractError::MissingRequiredPart(part)) => {
                format!("{part} file required")
            }
            SubmissionError::Extract(_) => "failed to process request".to_string(),
            SubmissionError::Decode(_) => "invalid XML format".to_string(),
        }
    }
}

/// Partial failure recorded without changing the submission outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Degradation {
    #[error("image extraction failed: {0}")]
    ImageExtraction(ExtractError),

    #[error("{task} failed: {error}")]
    ArchiveFailed {
        task: DispatchTask,
        error: ArchiveError,
    },

    #[error("processing failed: {0}")]
    ProcessingFailed(ProcessError),

    #[error("processing timed out after {0:?}")]
    ProcessingTimedOut(Duration),

    #[error("{task} task aborted: {reason}")]
    TaskAborted { task: DispatchTask, reason: String },
}

impl Degradation {
    /// Label used on the `kind` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            Degradation::ImageExtraction(_) => "image_extraction",
            Degradation::ArchiveFailed { .. } => "archive_failed",
            Degradation::ProcessingFailed(_) => "processing_failed",
            Degradation::ProcessingTimedOut(_) => "processing_timeout",
            Degradation::TaskAborted { .. } => "task_aborted",
        }
    }
}
