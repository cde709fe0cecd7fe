//! Canonical output types: [`Capture`] and its [`Image`]s.
//!
//! `Capture` is the only shape downstream consumers ever see. It deliberately
//! carries a handful of flat fields instead of the decoded XML tree, so a
//! firmware change in the event schema never ripples past the mapper.
//!
//! # Type Hierarchy
//!
//! ```text
//! Capture
//! ├── state: String            (camera "country")
//! ├── license_plate: String
//! ├── direction: String
//! ├── confidence: i32          (0–100, as reported)
//! ├── cam_ip: String
//! ├── capture_time: String     (RFC 3339, ingestion time)
//! ├── vehicle_type: String
//! ├── images: Vec<Image>       (≤ 1 per tag, never empty payloads)
//! │   ├── tag: ImageTag        (licensePlate | detection)
//! │   ├── data: Bytes
//! │   ├── file_name: String
//! │   └── content_type: String
//! └── xml_data: String         (verbatim submission XML)
//! ```
//!
//! # JSON
//!
//! Serialized field names follow the camera vocabulary (`country`,
//! `licensePlate`, `confidenceLevel`, `ipAddress`, ...). Image bytes are never
//! serialized; only their tag, filename and content type are.
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Closed set of image roles a submission can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageTag {
    /// Close-up crop of the plate.
    LicensePlate,
    /// Full scene the plate was detected in.
    Detection,
}

impl ImageTag {
    /// Every tag, in the order images are extracted and stored.
    pub const ALL: [ImageTag; 2] = [ImageTag::LicensePlate, ImageTag::Detection];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageTag::LicensePlate => "licensePlate",
            ImageTag::Detection => "detection",
        }
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One picture attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "type")]
    pub tag: ImageTag,

    #[serde(skip)]
    pub data: Bytes,

    #[serde(rename = "fileName")]
    pub file_name: String,

    #[serde(rename = "contentType")]
    pub content_type: String,
}

/// Canonical plate capture produced once per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Camera "country" field. The canonical record calls it state; consumers
    /// already read it under the JSON name `country`.
    #[serde(rename = "country")]
    pub state: String,

    #[serde(rename = "licensePlate")]
    pub license_plate: String,

    pub direction: String,

    /// Camera-reported confidence, passed through without clamping.
    #[serde(rename = "confidenceLevel")]
    pub confidence: i32,

    #[serde(rename = "ipAddress")]
    pub cam_ip: String,

    /// When the submission was mapped, not when the camera saw the vehicle.
    #[serde(rename = "captureTime")]
    pub capture_time: String,

    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,

    /// The submission's XML, byte-for-byte.
    #[serde(rename = "xmlData", default, skip_serializing_if = "String::is_empty")]
    pub xml_data: String,
}

impl Capture {
    /// Attach the extracted image set.
    ///
    /// Empty payloads are dropped and only the first image per tag is kept.
    pub fn attach_images(&mut self, images: Vec<Image>) {
        self.images.clear();
        for image in images {
            if image.data.is_empty() || self.image(image.tag).is_some() {
                continue;
            }
            self.images.push(image);
        }
    }

    /// Attach the verbatim submission XML.
    pub fn attach_xml(&mut self, xml: String) {
        self.xml_data = xml;
    }

    pub fn image(&self, tag: ImageTag) -> Option<&Image> {
        self.images.iter().find(|image| image.tag == tag)
    }

    pub fn license_plate_image(&self) -> Option<&Image> {
        self.image(ImageTag::LicensePlate)
    }

    pub fn detection_image(&self) -> Option<&Image> {
        self.image(ImageTag::Detection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> Capture {
        Capture {
            state: "PL".into(),
            license_plate: "WX12345".into(),
            direction: "forward".into(),
            confidence: 87,
            cam_ip: "192.168.1.64".into(),
            capture_time: "2024-05-14T08:22:31Z".into(),
            vehicle_type: "vehicle".into(),
            images: Vec::new(),
            xml_data: String::new(),
        }
    }

    fn image(tag: ImageTag, data: &'static [u8]) -> Image {
        Image {
            tag,
            data: Bytes::from_static(data),
            file_name: format!("{tag}.jpg"),
            content_type: "image/jpeg".into(),
        }
    }

    #[test]
    fn attach_images_drops_empty_and_duplicate_tags() {
        let mut capture = capture();
        capture.attach_images(vec![
            image(ImageTag::LicensePlate, b"\xff\xd8first"),
            image(ImageTag::Detection, b""),
            image(ImageTag::LicensePlate, b"\xff\xd8second"),
        ]);

        assert_eq!(capture.images.len(), 1);
        let plate = capture.license_plate_image().expect("plate image");
        assert_eq!(plate.data.as_ref(), b"\xff\xd8first");
        assert!(capture.detection_image().is_none());
    }

    #[test]
    fn json_uses_camera_field_names() {
        let mut capture = capture();
        capture.attach_images(vec![image(ImageTag::Detection, b"\xff\xd8")]);

        let json = serde_json::to_value(&capture).unwrap();
        assert_eq!(json["country"], "PL");
        assert_eq!(json["licensePlate"], "WX12345");
        assert_eq!(json["confidenceLevel"], 87);
        assert_eq!(json["ipAddress"], "192.168.1.64");
        assert_eq!(json["images"][0]["type"], "detection");
        assert_eq!(json["images"][0]["fileName"], "detection.jpg");
        assert!(json["images"][0].get("data").is_none());
        assert!(json.get("xmlData").is_none());
        assert!(json.get("state").is_none());
    }

    #[test]
    fn empty_images_are_omitted_from_json() {
        let json = serde_json::to_value(capture()).unwrap();
        assert!(json.get("images").is_none());
    }

    #[test]
    fn tag_display_matches_wire_name() {
        assert_eq!(ImageTag::LicensePlate.to_string(), "licensePlate");
        assert_eq!(
            serde_json::to_string(&ImageTag::Detection).unwrap(),
            "\"detection\""
        );
    }
}
