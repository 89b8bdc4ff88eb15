use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single geotagged photo, as produced by manual entry or a photo library import.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotoLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    pub filename: String,
    pub mime_type: String,
}

impl PhotoLocation {
    /// Whether the coordinates are finite and inside the valid latitude/longitude ranges.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        valid_coordinates(self.latitude, self.longitude)
    }
}

#[must_use]
pub fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// Media item as returned by the photo library API.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LibraryMediaItem {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    pub media_metadata: MediaMetadata,
    pub geo_location: Option<GeoLocation>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// RFC 3339 capture time.
    pub creation_time: String,
    pub width: Option<String>,
    pub height: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl LibraryMediaItem {
    /// Converts to a clusterable photo. Items without a usable location or capture time yield `None`.
    #[must_use]
    pub fn into_photo_location(self) -> Option<PhotoLocation> {
        let geo = self.geo_location?;
        if !valid_coordinates(geo.latitude, geo.longitude) {
            return None;
        }
        let timestamp = DateTime::parse_from_rfc3339(&self.media_metadata.creation_time)
            .ok()?
            .with_timezone(&Utc);

        Some(PhotoLocation {
            id: self.id,
            latitude: geo.latitude,
            longitude: geo.longitude,
            timestamp,
            filename: self.filename,
            mime_type: self.mime_type,
        })
    }
}
