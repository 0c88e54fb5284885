use serde::{Deserialize, Serialize};

use crate::ProjectError;

/// Capture location of a photo.
///
/// All fields are optional: the database generator leaves them empty for
/// photos without GPS EXIF data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Location {
    /// Coordinate pair in GeoJSON order, when both components are present.
    pub fn lng_lat(&self) -> Option<[f64; 2]> {
        match (self.lng, self.lat) {
            (Some(lng), Some(lat)) => Some([lng, lat]),
            _ => None,
        }
    }
}

/// Camera EXIF summary for display on the photo card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,
}

/// One photo of a project, in feed order.
///
/// Wire names are camelCase (`dateTaken`, `fullSize`, ...), matching the
/// published database format. `date_taken` is local time formatted
/// `"YYYY/MM/DD HH:MM:SS"`, which sorts lexicographically in chronological
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub metadata: PhotoMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
}

impl PhotoRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            caption: None,
            thumbnail: None,
            preview: None,
            full_size: None,
            aspect_ratio: None,
            location: Location::default(),
            metadata: PhotoMetadata::default(),
            tags: Vec::new(),
            date_taken: None,
        }
    }

    /// DOM id of this photo's feed card.
    pub fn element_id(&self) -> String {
        format!("photo-{}", self.id)
    }
}

/// A whole gallery project as fetched from `{base_url}/db.json`.
///
/// `base_url` stays snake_case on the wire; the photo fields are camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
}

impl ProjectData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            base_url: None,
            photos: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ProjectError> {
        serde_json::from_str(raw).map_err(|e| ProjectError::Decode(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(|e| ProjectError::Encode(e.to_string()))
    }

    /// Position of a photo in feed order, accepting either the raw photo id
    /// or the feed element id (`photo-<id>`).
    pub fn photo_index(&self, id: &str) -> Option<usize> {
        self.photos
            .iter()
            .position(|p| p.id == id || p.element_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{PhotoRecord, ProjectData};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "name": "journey",
        "title": "Photo Journey",
        "base_url": "https://photos.example.com/journey",
        "photos": [
            {
                "id": "1",
                "title": "Golden Gate Bridge",
                "thumbnail": "thumbs/1.webp",
                "aspectRatio": 1.5,
                "location": { "lat": 37.8199, "lng": -122.4783, "name": "San Francisco, CA" },
                "metadata": { "camera": "Canon EOS R5", "iso": 100, "shutterSpeed": "1/125s" },
                "tags": ["bridge", "fog"],
                "dateTaken": "2024/01/15 08:30:00"
            },
            { "id": "2", "location": { "lat": 40.7829, "lng": -73.9654 } }
        ]
    }"#;

    #[test]
    fn decodes_camel_case_wire_names() {
        let data = ProjectData::from_json(SAMPLE).unwrap();
        assert_eq!(data.name, "journey");
        assert_eq!(data.photos.len(), 2);

        let first = &data.photos[0];
        assert_eq!(first.aspect_ratio, Some(1.5));
        assert_eq!(first.date_taken.as_deref(), Some("2024/01/15 08:30:00"));
        assert_eq!(first.metadata.shutter_speed.as_deref(), Some("1/125s"));
        assert_eq!(first.location.lng_lat(), Some([-122.4783, 37.8199]));
    }

    #[test]
    fn partial_records_fill_with_defaults() {
        let data = ProjectData::from_json(SAMPLE).unwrap();
        let second = &data.photos[1];
        assert_eq!(second.title, None);
        assert!(second.tags.is_empty());
        assert_eq!(second.location.name, None);
        assert_eq!(second.location.lng_lat(), Some([-73.9654, 40.7829]));
    }

    #[test]
    fn json_round_trip_preserves_records() {
        let data = ProjectData::from_json(SAMPLE).unwrap();
        let encoded = data.to_json_pretty().unwrap();
        assert!(encoded.contains("\"dateTaken\""));
        assert!(encoded.contains("\"base_url\""));
        let decoded = ProjectData::from_json(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn photo_index_accepts_raw_and_element_ids() {
        let data = ProjectData::from_json(SAMPLE).unwrap();
        assert_eq!(data.photo_index("2"), Some(1));
        assert_eq!(data.photo_index("photo-2"), Some(1));
        assert_eq!(data.photo_index("photo-9"), None);
    }

    #[test]
    fn element_id_prefixes_photo_id() {
        assert_eq!(PhotoRecord::new("abc123").element_id(), "photo-abc123");
    }

    #[test]
    fn missing_coordinate_component_yields_no_pair() {
        let mut photo = PhotoRecord::new("1");
        photo.location.lat = Some(10.0);
        assert_eq!(photo.location.lng_lat(), None);
    }
}
