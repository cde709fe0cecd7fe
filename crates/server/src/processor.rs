use async_trait::async_trait;
use plategate::{Capture, CaptureProcessor, ProcessError};
use tracing::{debug, info};

/// Placeholder processing step: logs each capture and succeeds.
///
/// Watch-list checks, alerting and database writes plug in here by
/// implementing [`CaptureProcessor`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProcessor;

#[async_trait]
impl CaptureProcessor for LoggingProcessor {
    async fn process(&self, capture: Capture) -> Result<(), ProcessError> {
        info!(
            license_plate = %capture.license_plate,
            state = %capture.state,
            direction = %capture.direction,
            confidence = capture.confidence,
            vehicle_type = %capture.vehicle_type,
            cam_ip = %capture.cam_ip,
            capture_time = %capture.capture_time,
            images = capture.images.len(),
            "processing capture"
        );
        debug!(license_plate = %capture.license_plate, "capture processed");
        Ok(())
    }
}
