//! Decoded camera event to [`Capture`] projection.
use anpr::RawEvent;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::Capture;

/// Project a decoded event onto a [`Capture`].
///
/// `captured_at` becomes the capture time; the camera's own timestamps are
/// ignored. Images and the raw XML are attached by the caller afterwards.
pub fn map_event(event: &RawEvent, captured_at: DateTime<Utc>) -> Capture {
    let anpr = &event.anpr;

    Capture {
        state: anpr.country.clone(),
        license_plate: anpr.license_plate.clone(),
        direction: anpr.direction.clone(),
        confidence: anpr.confidence_level,
        cam_ip: event.ip_address.clone(),
        capture_time: format_capture_time(captured_at),
        vehicle_type: anpr.vehicle_type.clone(),
        images: Vec::new(),
        xml_data: String::new(),
    }
}

/// RFC 3339, UTC, whole seconds, `Z` suffix.
pub fn format_capture_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
