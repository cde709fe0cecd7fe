//! Locate the XML and image parts of a submission and read them to the end.
use bytes::Bytes;
use tracing::debug;

use crate::config::PartNames;
use crate::error::ExtractError;
use crate::form::{FormPart, MultipartForm};
use crate::types::{Image, ImageTag};

/// Parts pulled out of one submission.
#[derive(Debug)]
pub struct ExtractedParts {
    /// Body of the required XML part.
    pub xml: Bytes,
    /// Image set, or the first image read failure. An absent image part is not
    /// a failure; it is simply missing from the list.
    pub images: Result<Vec<Image>, ExtractError>,
}

/// Read the XML part, then the image parts in [`ImageTag::ALL`] order.
///
/// The XML part is mandatory: absence or a failed read ends extraction with an
/// error. Image failures are reported inside [`ExtractedParts::images`] so the
/// caller can decide to carry on without pictures. The form is consumed, which
/// drops every part that was never read.
pub async fn extract(
    mut form: MultipartForm,
    names: &PartNames,
) -> Result<ExtractedParts, ExtractError> {
    let xml_part = form
        .take(&names.xml)
        .ok_or_else(|| ExtractError::MissingRequiredPart(names.xml.clone()))?;
    let xml = read_part(&names.xml, xml_part).await?;

    let images = extract_images(&mut form, names).await;

    Ok(ExtractedParts { xml, images })
}

async fn extract_images(
    form: &mut MultipartForm,
    names: &PartNames,
) -> Result<Vec<Image>, ExtractError> {
    let mut images = Vec::with_capacity(ImageTag::ALL.len());

    for tag in ImageTag::ALL {
        let name = names.image_part(tag);
        let Some(part) = form.take(name) else {
            continue;
        };

        let file_name = part.file_name().unwrap_or(name).to_string();
        let content_type = part.content_type().unwrap_or_default().to_string();
        let data = read_part(name, part).await?;

        if data.is_empty() {
            debug!(part = %name, "skipping empty image part");
            continue;
        }

        images.push(Image {
            tag,
            data,
            file_name,
            content_type,
        });
    }

    Ok(images)
}

async fn read_part(name: &str, part: FormPart) -> Result<Bytes, ExtractError> {
    part.read_to_end()
        .await
        .map_err(|err| ExtractError::PartRead {
            part: name.to_string(),
            reason: err.to_string(),
        })
}
