use crate::clustering::partition::{DEFAULT_CLUSTER_RADIUS_KM, centroid, partition_by_seed};
use crate::geocoding::{GeocodingError, ReverseGeocoder};
use bon::bon;
use chrono::{DateTime, Utc};
use common_types::{LocationCluster, PhotoLocation};
use futures_util::{StreamExt, stream};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Name used when a cluster's location cannot be resolved.
#[must_use]
pub fn fallback_location_name(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// Groups geotagged photos into chronologically ordered location clusters.
///
/// Membership is decided up front by [`partition_by_seed`]; only then is every cluster named
/// through the geocoder, one lookup per cluster. A failed, empty or timed out lookup falls back
/// to [`fallback_location_name`], so clustering itself never fails.
pub struct PhotoClusterer<G> {
    geocoder: G,
    radius_km: f64,
    geocode_timeout: Option<Duration>,
    max_concurrent_lookups: usize,
}

#[bon]
impl<G: ReverseGeocoder> PhotoClusterer<G> {
    #[builder(start_fn = with_geocoder)]
    #[must_use]
    pub fn new(
        #[builder(start_fn)] geocoder: G,
        radius_km: Option<f64>,
        geocode_timeout: Option<Duration>,
        max_concurrent_lookups: Option<usize>,
    ) -> Self {
        Self {
            geocoder,
            radius_km: radius_km.unwrap_or(DEFAULT_CLUSTER_RADIUS_KM),
            geocode_timeout,
            max_concurrent_lookups: max_concurrent_lookups.unwrap_or(1).max(1),
        }
    }
}

/// A cluster with final membership, waiting for its name.
struct ClosedCluster {
    latitude: f64,
    longitude: f64,
    photos: Vec<PhotoLocation>,
    earliest_timestamp: DateTime<Utc>,
}

impl ClosedCluster {
    fn new(members: &[&PhotoLocation]) -> Option<Self> {
        let center = centroid(members);
        let mut photos: Vec<PhotoLocation> = members.iter().map(|&p| p.clone()).collect();
        // Stable, so photos taken at the same instant keep their input order.
        photos.sort_by_key(|p| p.timestamp);
        let earliest_timestamp = photos.first()?.timestamp;

        Some(Self {
            latitude: center.latitude,
            longitude: center.longitude,
            photos,
            earliest_timestamp,
        })
    }

    fn named(self, location_name: String) -> LocationCluster {
        LocationCluster {
            latitude: self.latitude,
            longitude: self.longitude,
            location_name,
            photos: self.photos,
            earliest_timestamp: self.earliest_timestamp,
        }
    }
}

impl<G: ReverseGeocoder> PhotoClusterer<G> {
    #[must_use]
    pub const fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Clusters `photos` and returns the clusters sorted by their earliest photo.
    pub async fn cluster(&self, photos: &[PhotoLocation]) -> Vec<LocationCluster> {
        if photos.is_empty() {
            return Vec::new();
        }

        let closed: Vec<ClosedCluster> = partition_by_seed(photos, self.radius_km)
            .into_iter()
            .filter_map(|indices| {
                let members: Vec<&PhotoLocation> = indices.iter().map(|&i| &photos[i]).collect();
                ClosedCluster::new(&members)
            })
            .collect();
        info!(
            "Grouped {} photos into {} clusters within {} km",
            photos.len(),
            closed.len(),
            self.radius_km
        );

        let mut clusters: Vec<LocationCluster> = stream::iter(closed)
            .map(|cluster| async move {
                let name = self
                    .resolve_location_name(cluster.latitude, cluster.longitude)
                    .await;
                debug!("Cluster of {} photos named '{}'", cluster.photos.len(), name);
                cluster.named(name)
            })
            .buffered(self.max_concurrent_lookups)
            .collect()
            .await;

        clusters.sort_by_key(|c| c.earliest_timestamp);
        clusters
    }

    async fn resolve_location_name(&self, latitude: f64, longitude: f64) -> String {
        let lookup = self.geocoder.reverse_geocode(latitude, longitude);
        let result = match self.geocode_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .unwrap_or_else(|_| Err(GeocodingError::Timeout(limit))),
            None => lookup.await,
        };

        match result {
            Ok(place) if !place.display_name.trim().is_empty() => place.display_name,
            Ok(_) => {
                warn!("Geocoder returned no name for ({latitude}, {longitude}), using coordinates");
                fallback_location_name(latitude, longitude)
            }
            Err(e) => {
                warn!("Reverse geocoding ({latitude}, {longitude}) failed, using coordinates: {e}");
                fallback_location_name(latitude, longitude)
            }
        }
    }
}

/// Clusters with a plain radius, looking up names one at a time without a timeout.
pub async fn cluster_photos<G: ReverseGeocoder>(
    photos: &[PhotoLocation],
    radius_km: f64,
    geocoder: G,
) -> Vec<LocationCluster> {
    PhotoClusterer::with_geocoder(geocoder)
        .radius_km(radius_km)
        .build()
        .cluster(photos)
        .await
}
