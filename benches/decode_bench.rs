use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use plategate::{decode, map_event};
use std::hint::black_box;

/// Camera event with `pictures` entries in its picture list
fn event_xml(pictures: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<EventNotificationAlert version="2.0" xmlns="http://www.hikvision.com/ver20/XMLSchema">
<ipAddress>192.168.1.64</ipAddress>
<portNo>80</portNo>
<protocol>HTTP</protocol>
<channelID>1</channelID>
<dateTime>2024-05-14T10:22:31+02:00</dateTime>
<eventType>ANPR</eventType>
<ANPR>
<country>PL</country>
<licensePlate>WX12345</licensePlate>
<direction>forward</direction>
<confidenceLevel>87</confidenceLevel>
<vehicleType>vehicle</vehicleType>
<vehicleInfo><index>1</index><colorDepth>2</colorDepth><color>white</color></vehicleInfo>
<pictureInfoList>
"#,
    );
    for i in 0..pictures {
        xml.push_str(&format!(
            "<pictureInfo><fileName>picture{i}.jpg</fileName><type>detectionPicture</type>\
             <dataType>0</dataType><plateRect><X>{i}</X><Y>40</Y><width>120</width>\
             <height>30</height></plateRect></pictureInfo>\n"
        ));
    }
    xml.push_str("</pictureInfoList>\n</ANPR>\n</EventNotificationAlert>\n");
    xml
}

/// Benchmark decode with growing picture lists
fn bench_decode_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("anpr_decode");

    for pictures in [0, 2, 16, 128].iter() {
        let xml = event_xml(*pictures);

        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_function(format!("pictures_{}", pictures), |b| {
            b.iter(|| {
                let _ = decode(black_box(xml.as_bytes())).expect("decode should succeed");
            });
        });
    }

    group.finish();
}

/// Benchmark decode followed by capture mapping
fn bench_decode_and_map(c: &mut Criterion) {
    let xml = event_xml(2);
    let now = Utc::now();

    c.bench_function("decode_and_map", |b| {
        b.iter(|| {
            let event = decode(black_box(xml.as_bytes())).expect("decode should succeed");
            let _ = map_event(black_box(&event), now);
        });
    });
}

criterion_group!(benches, bench_decode_sizes, bench_decode_and_map);
criterion_main!(benches);
