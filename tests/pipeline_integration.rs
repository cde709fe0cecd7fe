mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use plategate::{
    DispatchTask, ImageTag, MultipartForm, PipelineConfig, decode, map_event,
};

use common::{
    EVENT_XML, PLATE_JPEG, Recorder, SCENE_JPEG, full_form, jpeg_part, orchestrator, xml_part,
};

const JOIN_WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn full_submission_reaches_every_collaborator() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);

    let accepted = pipeline.ingest(Some(full_form()), "10.1.2.3").await.unwrap();
    assert_eq!(accepted.summary.license_plate, "WX12345");
    assert_eq!(accepted.summary.image_count, 2);
    assert!(accepted.degradations.is_empty());
    assert_eq!(
        accepted.dispatch.tasks().collect::<Vec<_>>(),
        vec![
            DispatchTask::XmlArchive,
            DispatchTask::ImageArchive,
            DispatchTask::Processing
        ]
    );

    let report = accepted.dispatch.join(JOIN_WAIT).await;
    assert!(report.is_clean());

    let xml_calls = recorder.xml.lock().unwrap().clone();
    assert_eq!(
        xml_calls,
        vec![(EVENT_XML.to_string(), "WX12345".to_string(), "10.1.2.3".to_string())]
    );
    let image_calls = recorder.images.lock().unwrap().clone();
    assert_eq!(image_calls.len(), 1);
    assert_eq!(image_calls[0].0.len(), 2);
    assert_eq!(image_calls[0].1, "10.1.2.3");
}

#[tokio::test]
async fn xml_data_round_trips_through_decode() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);

    let accepted = pipeline.ingest(Some(full_form()), "10.1.2.3").await.unwrap();
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert_eq!(capture.xml_data, EVENT_XML);

    let captured_at: DateTime<Utc> = capture.capture_time.parse().unwrap();
    let replayed = map_event(&decode(capture.xml_data.as_bytes()).unwrap(), captured_at);

    assert_eq!(replayed.state, capture.state);
    assert_eq!(replayed.license_plate, capture.license_plate);
    assert_eq!(replayed.direction, capture.direction);
    assert_eq!(replayed.confidence, capture.confidence);
    assert_eq!(replayed.cam_ip, capture.cam_ip);
    assert_eq!(replayed.vehicle_type, capture.vehicle_type);
    assert_eq!(replayed.capture_time, capture.capture_time);
}

#[tokio::test]
async fn capture_fields_follow_the_event() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);

    let accepted = pipeline.ingest(Some(full_form()), "10.1.2.3").await.unwrap();
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert_eq!(capture.state, "PL");
    assert_eq!(capture.cam_ip, "192.168.1.64");
    assert_eq!(capture.confidence, 87);
    assert_eq!(capture.direction, "forward");
    assert_eq!(capture.vehicle_type, "vehicle");
    assert!(capture.capture_time.ends_with('Z'));
    assert_ne!(capture.capture_time, "2024-05-14T10:22:31+02:00");
}

#[tokio::test]
async fn xml_without_images_is_accepted() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);
    let form = MultipartForm::new().with_part("anpr.xml", xml_part(EVENT_XML));

    let accepted = pipeline.ingest(Some(form), "10.1.2.3").await.unwrap();
    assert_eq!(accepted.summary.image_count, 0);
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert!(capture.images.is_empty());
    assert_eq!(recorder.image_calls(), 0);
    assert_eq!(recorder.xml_calls(), 1);
}

#[tokio::test]
async fn both_images_are_tagged_once() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);

    let accepted = pipeline.ingest(Some(full_form()), "10.1.2.3").await.unwrap();
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert_eq!(capture.images.len(), 2);

    let plate = capture.license_plate_image().unwrap();
    assert_eq!(plate.tag, ImageTag::LicensePlate);
    assert_eq!(plate.data.as_ref(), PLATE_JPEG);

    let scene = capture.detection_image().unwrap();
    assert_eq!(scene.tag, ImageTag::Detection);
    assert_eq!(scene.data.as_ref(), SCENE_JPEG);
}

#[tokio::test]
async fn missing_anpr_block_maps_to_zero_values() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = orchestrator(PipelineConfig::default(), &recorder);
    let xml = "<EventNotificationAlert><ipAddress>10.0.0.9</ipAddress>\
               <eventType>videoloss</eventType></EventNotificationAlert>";
    let form = MultipartForm::new().with_part("anpr.xml", xml_part(xml));

    let accepted = pipeline.ingest(Some(form), "10.1.2.3").await.unwrap();
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert_eq!(capture.cam_ip, "10.0.0.9");
    assert_eq!(capture.license_plate, "");
    assert_eq!(capture.confidence, 0);
}

#[tokio::test]
async fn archives_are_skipped_when_disabled() {
    let recorder = Arc::new(Recorder::default());
    let config = PipelineConfig {
        save_xml: false,
        save_images: false,
        ..Default::default()
    };
    let pipeline = orchestrator(config, &recorder);

    let accepted = pipeline.ingest(Some(full_form()), "10.1.2.3").await.unwrap();
    assert_eq!(
        accepted.dispatch.tasks().collect::<Vec<_>>(),
        vec![DispatchTask::Processing]
    );
    accepted.dispatch.join(JOIN_WAIT).await;

    assert_eq!(recorder.xml_calls(), 0);
    assert_eq!(recorder.image_calls(), 0);
    assert_eq!(recorder.captures().len(), 1);
}

#[tokio::test]
async fn custom_part_names_are_honoured() {
    let recorder = Arc::new(Recorder::default());
    let mut config = PipelineConfig::default();
    config.parts.xml = "event.xml".into();
    config.parts.detection = "scene.jpg".into();
    let pipeline = orchestrator(config, &recorder);

    let form = MultipartForm::new()
        .with_part("event.xml", xml_part(EVENT_XML))
        .with_part("scene.jpg", jpeg_part("scene.jpg", SCENE_JPEG))
        .with_part("detectionPicture.jpg", jpeg_part("ignored.jpg", PLATE_JPEG));

    let accepted = pipeline.ingest(Some(form), "10.1.2.3").await.unwrap();
    accepted.dispatch.join(JOIN_WAIT).await;

    let capture = recorder.captures().pop().unwrap();
    assert_eq!(capture.images.len(), 1);
    assert_eq!(capture.detection_image().unwrap().file_name, "scene.jpg");
}

#[tokio::test]
async fn concurrent_submissions_are_independent() {
    let recorder = Arc::new(Recorder::default());
    let pipeline = Arc::new(orchestrator(PipelineConfig::default(), &recorder));

    let mut handles = Vec::new();
    for i in 0..8 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            let xml = EVENT_XML.replace("WX12345", &format!("WX{i:05}"));
            let form = MultipartForm::new().with_part("anpr.xml", xml_part(&xml));
            let accepted = pipeline.ingest(Some(form), "10.1.2.3").await.unwrap();
            accepted.dispatch.join(JOIN_WAIT).await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut plates: Vec<String> = recorder
        .captures()
        .into_iter()
        .map(|capture| capture.license_plate)
        .collect();
    plates.sort();
    assert_eq!(plates.len(), 8);
    assert_eq!(plates[0], "WX00000");
    assert_eq!(plates[7], "WX00007");
}
