//! Part-name conventions for camera submissions.
//!
//! Cameras name multipart parts after the file they carry. The defaults match
//! what ANPR firmware posts out of the box; deployments with renamed uploads can
//! override them from configuration.
//!
//! ```rust
//! use ingest::{ImageTag, PartNames};
//!
//! let names = PartNames::default();
//! assert_eq!(names.xml, "anpr.xml");
//! assert_eq!(names.image_part(ImageTag::Detection), "detectionPicture.jpg");
//! assert!(names.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ImageTag;

pub const DEFAULT_XML_PART: &str = "anpr.xml";
pub const DEFAULT_LICENSE_PLATE_PART: &str = "licensePlatePicture.jpg";
pub const DEFAULT_DETECTION_PART: &str = "detectionPicture.jpg";

/// Names of the multipart parts the extractor looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartNames {
    /// Required XML event part.
    #[serde(default = "default_xml_part")]
    pub xml: String,

    /// Close-up plate crop, tagged [`ImageTag::LicensePlate`].
    #[serde(default = "default_license_plate_part")]
    pub license_plate: String,

    /// Full scene picture, tagged [`ImageTag::Detection`].
    #[serde(default = "default_detection_part")]
    pub detection: String,
}

impl Default for PartNames {
    fn default() -> Self {
        Self {
            xml: default_xml_part(),
            license_plate: default_license_plate_part(),
            detection: default_detection_part(),
        }
    }
}

impl PartNames {
    /// Part name that carries the image for `tag`.
    pub fn image_part(&self, tag: ImageTag) -> &str {
        match tag {
            ImageTag::LicensePlate => &self.license_plate,
            ImageTag::Detection => &self.detection,
        }
    }

    /// Names must be non-empty and distinct, otherwise one part would be read
    /// twice or never.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("xml", &self.xml),
            ("license_plate", &self.license_plate),
            ("detection", &self.detection),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyPartName(field));
            }
        }

        if self.xml == self.license_plate || self.xml == self.detection {
            return Err(ConfigError::DuplicatePartName(self.xml.clone()));
        }
        if self.license_plate == self.detection {
            return Err(ConfigError::DuplicatePartName(self.license_plate.clone()));
        }

        Ok(())
    }
}

/// Validation failures for [`PartNames`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("part name `{0}` must not be empty")]
    EmptyPartName(&'static str),

    #[error("part name {0:?} is configured more than once")]
    DuplicatePartName(String),
}

fn default_xml_part() -> String {
    DEFAULT_XML_PART.to_string()
}

fn default_license_plate_part() -> String {
    DEFAULT_LICENSE_PLATE_PART.to_string()
}

fn default_detection_part() -> String {
    DEFAULT_DETECTION_PART.to_string()
}
