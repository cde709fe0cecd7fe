//! Typed model of the camera's `EventNotificationAlert` vocabulary.
//!
//! Every field is optional on the wire. A missing element leaves the field at
//! its zero value (empty string, `0`, `false`, empty list, `None`), so the
//! `Default` impl of each struct is also the "nothing was sent" value.
//! Unknown elements are skipped, which keeps older builds working against
//! newer firmware. A repeated leaf keeps its last value and a repeated
//! nested element merges into the earlier one.
//!
//! # Shape
//!
//! ```text
//! EventNotificationAlert (RawEvent)
//! ├── @version, @xmlns
//! ├── ipAddress, portNo, protocol, macAddress, channelID, channelName, UUID
//! ├── dateTime, activePostCount, eventType, eventState, eventDescription
//! ├── picNum, isDataRetransmission
//! └── ANPR (AnprBlock)
//!     ├── country, province, licensePlate, line, direction, confidenceLevel
//!     ├── plateType, plateColor, licenseBright, vehicleType, detectDir
//!     ├── originalLicensePlate
//!     ├── vehicleInfo (VehicleInfo)
//!     └── pictureInfoList
//!         └── pictureInfo* (PictureInfo)
//!             └── plateRect? (PlateRect)
//! ```
use crate::merge::xml_fields;

/// Root of a decoded ANPR event notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub version: String,
    pub xmlns: String,

    /// Address the camera reports for itself.
    pub ip_address: String,
    pub port_no: String,
    pub protocol: String,
    pub mac_address: String,
    pub channel_id: String,
    pub channel_name: String,
    pub uuid: String,

    /// Camera-clock timestamp, kept as the raw string the firmware sent.
    pub date_time: String,
    pub active_post_count: i32,
    pub event_type: String,
    pub event_state: String,
    pub event_description: String,
    pub pic_num: i32,
    pub is_data_retransmission: bool,

    pub anpr: AnprBlock,
}

/// Recognition result carried in the `ANPR` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnprBlock {
    pub country: String,
    pub province: String,
    pub license_plate: String,
    /// Plate line the text was read from (single- vs double-row plates).
    pub line: i32,
    pub direction: String,
    /// Camera-reported confidence on a 0–100 scale. Passed through untouched.
    pub confidence_level: i32,
    pub plate_type: String,
    pub plate_color: String,
    pub license_bright: i32,
    pub vehicle_type: String,
    pub detect_dir: i32,
    pub vehicle_info: VehicleInfo,
    pub picture_info_list: PictureInfoList,
    /// Plate text before the camera applied its own correction rules.
    pub original_license_plate: String,
}

impl AnprBlock {
    /// Pictures listed under `pictureInfoList`, in document order.
    pub fn pictures(&self) -> &[PictureInfo] {
        &self.picture_info_list.pictures
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleInfo {
    pub index: i32,
    pub color_depth: i32,
    pub color: String,
    pub length: i32,
    pub vehicle_logo_recog: i32,
    pub vehicle_sub_logo_recog: i32,
    pub vehicle_model: i32,
}

/// Wrapper for the `pictureInfoList` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureInfoList {
    pub pictures: Vec<PictureInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureInfo {
    pub file_name: String,
    pub kind: String,
    pub data_type: i32,
    pub abs_time: String,
    pub p_id: String,
    pub plate_rect: Option<PlateRect>,
}

/// Plate bounding box inside the referenced picture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlateRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

xml_fields!(RawEvent, "EventNotificationAlert" {
    "@version" => version,
    "@xmlns" => xmlns,
    "ipAddress" => ip_address,
    "portNo" => port_no,
    "protocol" => protocol,
    "macAddress" => mac_address,
    "channelID" => channel_id,
    "channelName" => channel_name,
    "UUID" => uuid,
    "dateTime" => date_time,
    "activePostCount" => active_post_count,
    "eventType" => event_type,
    "eventState" => event_state,
    "eventDescription" => event_description,
    "picNum" => pic_num,
    "isDataRetransmission" => is_data_retransmission,
    "ANPR" => anpr,
});

xml_fields!(AnprBlock, "ANPR" {
    "country" => country,
    "province" => province,
    "licensePlate" => license_plate,
    "line" => line,
    "direction" => direction,
    "confidenceLevel" => confidence_level,
    "plateType" => plate_type,
    "plateColor" => plate_color,
    "licenseBright" => license_bright,
    "vehicleType" => vehicle_type,
    "detectDir" => detect_dir,
    "vehicleInfo" => vehicle_info,
    "pictureInfoList" => picture_info_list,
    "originalLicensePlate" => original_license_plate,
});

xml_fields!(VehicleInfo, "vehicleInfo" {
    "index" => index,
    "colorDepth" => color_depth,
    "color" => color,
    "length" => length,
    "vehicleLogoRecog" => vehicle_logo_recog,
    // the firmware spells these two without the "c"
    "vehileSubLogoRecog" => vehicle_sub_logo_recog,
    "vehileModel" => vehicle_model,
});

xml_fields!(PictureInfoList, "pictureInfoList" {
    "pictureInfo" => pictures,
});

xml_fields!(PictureInfo, "pictureInfo" {
    "fileName" => file_name,
    "type" => kind,
    "dataType" => data_type,
    "absTime" => abs_time,
    "pId" => p_id,
    "plateRect" => plate_rect,
});

xml_fields!(PlateRect, "plateRect" {
    "X" => x,
    "Y" => y,
    "width" => width,
    "height" => height,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_event_is_all_zero() {
        let event = RawEvent::default();
        assert!(event.ip_address.is_empty());
        assert_eq!(event.pic_num, 0);
        assert!(!event.is_data_retransmission);
        assert!(event.anpr.license_plate.is_empty());
        assert_eq!(event.anpr.confidence_level, 0);
        assert!(event.anpr.pictures().is_empty());
        assert_eq!(event.anpr.vehicle_info, VehicleInfo::default());
    }
}
