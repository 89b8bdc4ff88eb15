use crate::PhotoLocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A group of nearby photos that becomes one pin on the map.
///
/// `latitude`/`longitude` are the planar mean of the member coordinates, `photos` is sorted
/// by ascending timestamp and `earliest_timestamp` equals the first photo's timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationCluster {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub photos: Vec<PhotoLocation>,
    pub earliest_timestamp: DateTime<Utc>,
}

impl LocationCluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photo_ids(&self) -> impl Iterator<Item = &str> {
        self.photos.iter().map(|p| p.id.as_str())
    }
}
