//! Workspace umbrella crate for plategate.
//!
//! This crate stitches the ingest stages together: a camera's multipart
//! submission goes in, the [`IngestionOrchestrator`] extracts the parts,
//! decodes the ANPR XML, maps it onto a [`Capture`] and hands that capture to
//! the archive and processing collaborators without waiting on them.
//!
//! ```text
//! MultipartForm ──► ingest::extract ──► anpr::decode ──► ingest::map_event
//!                                                              │
//!                       ┌───────────────┬────────────────────┬─┘
//!                       ▼               ▼                    ▼
//!                  XmlArchive      ImageArchive      CaptureProcessor
//!                  (spawned)        (spawned)      (spawned, with timeout)
//! ```
//!
//! The HTTP surface lives in the `server` crate; this crate never touches the
//! network or the filesystem itself.

mod config;
mod dispatch;
mod error;
mod orchestrator;

pub use anpr::{DecodeError, RawEvent, decode};
pub use ingest::{
    Capture, ExtractError, FormPart, Image, ImageTag, MultipartForm, PartNames, PartStream,
    map_event,
};

pub use crate::config::{ConfigError, PipelineConfig};
pub use crate::dispatch::{
    ArchiveError, CaptureProcessor, DispatchHandle, DispatchReport, DispatchTask, ImageArchive,
    ProcessError, XmlArchive,
};
pub use crate::error::{Degradation, RejectionKind, SubmissionError};
pub use crate::orchestrator::{Accepted, CaptureSummary, IngestionOrchestrator, Stage};
