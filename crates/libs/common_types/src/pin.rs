use crate::LocationCluster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PinSource {
    Manual,
    GooglePhotos,
}

/// A pin ready to be inserted by the persistence layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewPin {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub visit_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub source: PinSource,
    pub photos: Vec<NewPhoto>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub google_photo_id: Option<String>,
    pub filename: String,
    pub mime_type: String,
    pub display_order: i32,
    pub taken_date: DateTime<Utc>,
}

impl NewPin {
    /// Maps one cluster to one pin. Photos keep the cluster's chronological order.
    #[must_use]
    pub fn from_cluster(cluster: LocationCluster, source: PinSource) -> Self {
        let photos = cluster
            .photos
            .into_iter()
            .zip(0..)
            .map(|(photo, display_order)| NewPhoto {
                google_photo_id: (source == PinSource::GooglePhotos).then_some(photo.id),
                filename: photo.filename,
                mime_type: photo.mime_type,
                display_order,
                taken_date: photo.timestamp,
            })
            .collect();

        Self {
            latitude: cluster.latitude,
            longitude: cluster.longitude,
            location_name: cluster.location_name,
            visit_date: cluster.earliest_timestamp,
            notes: None,
            source,
            photos,
        }
    }
}
