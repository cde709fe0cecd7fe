//! Byte-level entry point: raw XML in, [`RawEvent`] out.
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::DecodeError;
use crate::schema::RawEvent;

/// Local name the document root must carry. Namespace prefixes are ignored.
pub const ROOT_ELEMENT: &str = "EventNotificationAlert";

/// Decode an `EventNotificationAlert` document.
///
/// Missing elements decode to zero values and unknown elements are skipped.
/// A repeated element keeps its last value. Text leaves are trimmed.
/// Wrong root, broken markup, and unparseable typed leaves are errors.
/// The function performs no I/O and reads no clock.
///
/// ```rust
/// let xml = b"<EventNotificationAlert><ANPR><licensePlate>AB123</licensePlate>\
///             <confidenceLevel>87</confidenceLevel></ANPR></EventNotificationAlert>";
/// let event = anpr::decode(xml).unwrap();
/// assert_eq!(event.anpr.license_plate, "AB123");
/// assert_eq!(event.anpr.confidence_level, 87);
/// ```
pub fn decode(bytes: &[u8]) -> Result<RawEvent, DecodeError> {
    let text =
        std::str::from_utf8(bytes).map_err(|err| DecodeError::InvalidEncoding(err.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    check_root(text)?;

    quick_xml::de::from_str(text).map_err(|err| DecodeError::MalformedXml(err.to_string()))
}

/// Scan up to the first element and make sure it is the expected root.
fn check_root(text: &str) -> Result<(), DecodeError> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                let name = start.local_name();
                if name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Ok(());
                }
                return Err(DecodeError::UnexpectedRoot {
                    expected: ROOT_ELEMENT,
                    found: String::from_utf8_lossy(name.as_ref()).into_owned(),
                });
            }
            Ok(Event::Eof) => return Err(DecodeError::EmptyDocument),
            Ok(_) => {}
            Err(err) => return Err(DecodeError::MalformedXml(err.to_string())),
        }
    }
}
