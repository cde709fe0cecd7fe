//! Plategate Ingest Layer
//!
//! This is where a camera submission turns into something the rest of the
//! system can use. We take the multipart form the HTTP layer decoded, pull out
//! the XML event and any pictures, and map the decoded event onto a flat
//! [`Capture`].
//!
//! ## What we do here
//!
//! - **Extract parts** - Find the required XML part and the optional image
//!   parts by name, read them to the end, and tag the images.
//! - **Map events** - Project a decoded [`anpr::RawEvent`] onto a [`Capture`].
//!   Camera "country" becomes `state`, the capture time is stamped by us.
//! - **Stay quiet about policy** - Extraction reports which part failed and how.
//!   Whether that sinks the submission is the orchestrator's call.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use ingest::{extract, map_event, FormPart, MultipartForm, PartNames};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_multi_thread().build().unwrap();
//! # rt.block_on(async {
//! let xml = "<EventNotificationAlert><ipAddress>10.0.0.7</ipAddress>\
//!            <ANPR><licensePlate>KR9876A</licensePlate></ANPR></EventNotificationAlert>";
//! let form = MultipartForm::new().with_part("anpr.xml", FormPart::from_bytes(None, None, xml));
//!
//! let parts = extract(form, &PartNames::default()).await.unwrap();
//! let event = anpr::decode(&parts.xml).unwrap();
//!
//! let mut capture = map_event(&event, Utc::now());
//! capture.attach_images(parts.images.unwrap());
//!
//! assert_eq!(capture.license_plate, "KR9876A");
//! assert_eq!(capture.cam_ip, "10.0.0.7");
//! assert!(capture.images.is_empty());
//! # });
//! # }
//! ```
mod config;
mod error;
mod extract;
mod form;
mod mapper;
mod types;

pub use crate::config::{
    ConfigError, PartNames, DEFAULT_DETECTION_PART, DEFAULT_LICENSE_PLATE_PART, DEFAULT_XML_PART,
};
pub use crate::error::ExtractError;
pub use crate::extract::{extract, ExtractedParts};
pub use crate::form::{FormPart, MultipartForm, PartStream};
pub use crate::mapper::{format_capture_time, map_event};
pub use crate::types::{Capture, Image, ImageTag};
