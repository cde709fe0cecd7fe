//! Filesystem archive for submission XML and images.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/xml/<submitter>/<YYYYMMDD_HHMMSS>_<plate>.xml
//! <root>/images/<submitter>/<tag>/<YYYYMMDD_HHMMSS>_<fileName>
//! ```
//!
//! Every component taken from the request is sanitized before it touches a
//! path, so a camera cannot write outside its own directory.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use plategate::{ArchiveError, Image, ImageArchive, ImageTag, XmlArchive};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Writes archives below a storage root, creating directories on demand.
#[derive(Debug, Clone)]
pub struct FsArchive {
    root: PathBuf,
}

impl FsArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn xml_path(&self, submitter: &str, license_plate: &str, at: DateTime<Utc>) -> PathBuf {
        self.root
            .join("xml")
            .join(sanitize_component(submitter))
            .join(format!(
                "{}_{}.xml",
                at.format(TIMESTAMP_FORMAT),
                sanitize_component(license_plate)
            ))
    }

    pub fn image_path(
        &self,
        submitter: &str,
        tag: ImageTag,
        file_name: &str,
        at: DateTime<Utc>,
    ) -> PathBuf {
        self.root
            .join("images")
            .join(sanitize_component(submitter))
            .join(tag.as_str())
            .join(format!(
                "{}_{}",
                at.format(TIMESTAMP_FORMAT),
                sanitize_component(file_name)
            ))
    }
}

#[async_trait]
impl XmlArchive for FsArchive {
    async fn save_xml(
        &self,
        xml: &str,
        license_plate: &str,
        submitter: &str,
    ) -> Result<(), ArchiveError> {
        let path = self.xml_path(submitter, license_plate, Utc::now());
        write_file(&path, xml.as_bytes()).await?;
        debug!(path = %path.display(), "xml archived");
        Ok(())
    }
}

#[async_trait]
impl ImageArchive for FsArchive {
    async fn save_images(&self, images: &[Image], submitter: &str) -> Result<(), ArchiveError> {
        let at = Utc::now();
        let mut first_error = None;

        for image in images {
            let path = self.image_path(submitter, image.tag, &image.file_name, at);
            match write_file(&path, &image.data).await {
                Ok(()) => debug!(path = %path.display(), tag = %image.tag, "image archived"),
                Err(err) => {
                    warn!(tag = %image.tag, error = %err, "failed to archive image");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), ArchiveError> {
    let to_error = |err: std::io::Error| ArchiveError::Write {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(to_error)?;
    }
    tokio::fs::write(path, data).await.map_err(to_error)
}

/// Make a request-supplied value safe to use as a single path component.
pub fn sanitize_component(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.replace("..", "_");

    if cleaned.is_empty() || cleaned == "." {
        "unknown".to_string()
    } else {
        cleaned
    }
}
