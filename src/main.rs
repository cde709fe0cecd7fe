//! Replay stored ANPR XML files through decode + map and print the captures.
//!
//! ```text
//! plategate-replay storage/xml/192.168.1.64/20240514_082231_WX12345.xml
//! ```
use std::error::Error;
use std::fs;

use chrono::Utc;

fn main() -> Result<(), Box<dyn Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err("usage: plategate-replay <event.xml>...".into());
    }

    for path in paths {
        let bytes = fs::read(&path)?;
        let event = plategate::decode(&bytes).map_err(|err| format!("{path}: {err}"))?;

        let capture = plategate::map_event(&event, Utc::now());
        println!("{}", serde_json::to_string_pretty(&capture)?);
    }

    Ok(())
}
