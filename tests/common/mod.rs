#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use plategate::{
    ArchiveError, Capture, CaptureProcessor, FormPart, Image, ImageArchive, IngestionOrchestrator,
    MultipartForm, PipelineConfig, ProcessError, XmlArchive,
};

pub const EVENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EventNotificationAlert version="2.0" xmlns="http://www.hikvision.com/ver20/XMLSchema">
<ipAddress>192.168.1.64</ipAddress>
<portNo>80</portNo>
<protocol>HTTP</protocol>
<macAddress>44:19:b6:6d:24:85</macAddress>
<channelID>1</channelID>
<dateTime>2024-05-14T10:22:31+02:00</dateTime>
<activePostCount>1</activePostCount>
<eventType>ANPR</eventType>
<eventState>active</eventState>
<eventDescription>ANPR</eventDescription>
<channelName>Gate North</channelName>
<ANPR>
<country>PL</country>
<licensePlate>WX12345</licensePlate>
<line>1</line>
<direction>forward</direction>
<confidenceLevel>87</confidenceLevel>
<plateType>unknown</plateType>
<plateColor>white</plateColor>
<vehicleType>vehicle</vehicleType>
<pictureInfoList>
<pictureInfo><fileName>licensePlatePicture.jpg</fileName><type>licensePlatePicture</type></pictureInfo>
<pictureInfo><fileName>detectionPicture.jpg</fileName><type>detectionPicture</type></pictureInfo>
</pictureInfoList>
</ANPR>
<UUID>c8b2f6d4-1111-2222-3333-444455556666</UUID>
<picNum>2</picNum>
</EventNotificationAlert>
"#;

pub const PLATE_JPEG: &[u8] = b"\xff\xd8\xff\xe0plate-crop";
pub const SCENE_JPEG: &[u8] = b"\xff\xd8\xff\xe0full-scene";

pub fn xml_part(xml: &str) -> FormPart {
    FormPart::from_bytes(
        Some("anpr.xml".into()),
        Some("application/xml".into()),
        Bytes::copy_from_slice(xml.as_bytes()),
    )
}

pub fn jpeg_part(file_name: &str, data: &'static [u8]) -> FormPart {
    FormPart::from_bytes(
        Some(file_name.into()),
        Some("image/jpeg".into()),
        Bytes::from_static(data),
    )
}

/// Part whose stream yields one chunk and then fails.
pub fn broken_part(file_name: &str) -> FormPart {
    let body = stream::iter(vec![
        Ok(Bytes::from_static(b"\xff\xd8")),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset")),
    ])
    .boxed();
    FormPart::new(Some(file_name.into()), Some("image/jpeg".into()), body)
}

pub fn full_form() -> MultipartForm {
    MultipartForm::new()
        .with_part("anpr.xml", xml_part(EVENT_XML))
        .with_part("licensePlatePicture.jpg", jpeg_part("licensePlatePicture.jpg", PLATE_JPEG))
        .with_part("detectionPicture.jpg", jpeg_part("detectionPicture.jpg", SCENE_JPEG))
}

/// Archive and processor that remembers everything it was handed.
#[derive(Default)]
pub struct Recorder {
    pub xml: Mutex<Vec<(String, String, String)>>,
    pub images: Mutex<Vec<(Vec<Image>, String)>>,
    pub captures: Mutex<Vec<Capture>>,
    pub fail_archives: bool,
}

impl Recorder {
    pub fn failing() -> Self {
        Self {
            fail_archives: true,
            ..Default::default()
        }
    }

    pub fn captures(&self) -> Vec<Capture> {
        self.captures.lock().unwrap().clone()
    }

    pub fn xml_calls(&self) -> usize {
        self.xml.lock().unwrap().len()
    }

    pub fn image_calls(&self) -> usize {
        self.images.lock().unwrap().len()
    }
}

#[async_trait]
impl XmlArchive for Recorder {
    async fn save_xml(
        &self,
        xml: &str,
        license_plate: &str,
        submitter: &str,
    ) -> Result<(), ArchiveError> {
        if self.fail_archives {
            return Err(ArchiveError::Unavailable("disk full".into()));
        }
        self.xml
            .lock()
            .unwrap()
            .push((xml.into(), license_plate.into(), submitter.into()));
        Ok(())
    }
}

#[async_trait]
impl ImageArchive for Recorder {
    async fn save_images(&self, images: &[Image], submitter: &str) -> Result<(), ArchiveError> {
        if self.fail_archives {
            return Err(ArchiveError::Unavailable("disk full".into()));
        }
        self.images
            .lock()
            .unwrap()
            .push((images.to_vec(), submitter.into()));
        Ok(())
    }
}

#[async_trait]
impl CaptureProcessor for Recorder {
    async fn process(&self, capture: Capture) -> Result<(), ProcessError> {
        self.captures.lock().unwrap().push(capture);
        Ok(())
    }
}

/// Processor that never finishes within any sane timeout.
pub struct StuckProcessor;

#[async_trait]
impl CaptureProcessor for StuckProcessor {
    async fn process(&self, _capture: Capture) -> Result<(), ProcessError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

pub fn orchestrator(config: PipelineConfig, recorder: &Arc<Recorder>) -> IngestionOrchestrator {
    IngestionOrchestrator::new(
        config,
        recorder.clone(),
        recorder.clone(),
        recorder.clone(),
    )
    .expect("valid pipeline config")
}
