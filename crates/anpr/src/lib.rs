//! ANPR event schema and XML decoder.
//!
//! Network cameras report plate reads as an `EventNotificationAlert` XML
//! document. This crate turns those bytes into a [`RawEvent`] tree and nothing
//! more: no I/O, no clock, no mapping to downstream records.
//!
//! ## What we guarantee
//!
//! - **Tolerant of omissions** - every element is optional; missing ones come
//!   back as empty strings, zeros, `false`, or empty lists.
//! - **Tolerant of additions** - elements this crate does not know are skipped,
//!   so new firmware fields never break decoding.
//! - **Last value wins** - a repeated leaf overwrites the earlier one, and
//!   `pictureInfo` items are collected wherever they sit in their list.
//! - **Strict about garbage** - broken markup, a foreign root element, or a
//!   typed leaf that does not parse (`<confidenceLevel>high</confidenceLevel>`)
//!   is a [`DecodeError`].
//!
//! ## Example
//!
//! ```
//! let xml = br#"<EventNotificationAlert version="2.0">
//!     <ipAddress>192.168.1.64</ipAddress>
//!     <ANPR><country>PL</country><licensePlate>WX12345</licensePlate></ANPR>
//! </EventNotificationAlert>"#;
//!
//! let event = anpr::decode(xml).expect("well-formed");
//! assert_eq!(event.ip_address, "192.168.1.64");
//! assert_eq!(event.anpr.country, "PL");
//! assert!(event.anpr.pictures().is_empty());
//! ```
mod decode;
mod error;
mod merge;
pub mod lenient;
mod schema;

pub use crate::decode::{decode, ROOT_ELEMENT};
pub use crate::error::DecodeError;
pub use crate::schema::{AnprBlock, PictureInfo, PictureInfoList, PlateRect, RawEvent, VehicleInfo};
