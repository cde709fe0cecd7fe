//! Pipeline configuration.
//!
//! Every field has a default, so an empty document is a valid configuration.
//! The server embeds this under its `pipeline` key:
//!
//! ```yaml
//! pipeline:
//!   parts:
//!     xml: "anpr.xml"
//!     license_plate: "licensePlatePicture.jpg"
//!     detection: "detectionPicture.jpg"
//!   save_xml: true
//!   save_images: true
//!   processing_timeout_ms: 5000
//! ```

use std::time::Duration;

use ingest::PartNames;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`PipelineConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid part names: {0}")]
    Parts(#[from] ingest::ConfigError),

    #[error("processing_timeout_ms must be greater than zero")]
    ZeroProcessingTimeout,
}

/// Behaviour of one [`IngestionOrchestrator`](crate::IngestionOrchestrator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Multipart part names to look for
    #[serde(default)]
    pub parts: PartNames,

    /// Hand the raw XML to the XML archive
    #[serde(default = "true_value")]
    pub save_xml: bool,

    /// Hand extracted images to the image archive
    #[serde(default = "true_value")]
    pub save_images: bool,

    /// Upper bound for the processing collaborator, in milliseconds
    #[serde(default = "default_processing_timeout_ms")]
    pub processing_timeout_ms: u64,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parts.validate()?;
        if self.processing_timeout_ms == 0 {
            return Err(ConfigError::ZeroProcessingTimeout);
        }
        Ok(())
    }

    pub fn processing_timeout(&self) -> Duration {
        Duration::from_millis(self.processing_timeout_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parts: PartNames::default(),
            save_xml: true,
            save_images: true,
            processing_timeout_ms: default_processing_timeout_ms(),
        }
    }
}

fn true_value() -> bool {
    true
}

fn default_processing_timeout_ms() -> u64 {
    5_000
}
