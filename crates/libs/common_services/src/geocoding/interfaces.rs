use crate::geocoding::{GeocodingError, GeocodingResult};
use async_trait::async_trait;
use common_types::GeocodedPlace;
use std::sync::Arc;
use tracing::warn;

/// Turns coordinates into a human readable place.
///
/// Implementations may fail or return an empty name; callers are expected to degrade gracefully.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse_geocode(&self, latitude: f64, longitude: f64)
    -> GeocodingResult<GeocodedPlace>;
}

#[async_trait]
impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for Arc<T> {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> GeocodingResult<GeocodedPlace> {
        (**self).reverse_geocode(latitude, longitude).await
    }
}

#[async_trait]
impl<'a, T: ReverseGeocoder + ?Sized> ReverseGeocoder for &'a T {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> GeocodingResult<GeocodedPlace> {
        (**self).reverse_geocode(latitude, longitude).await
    }
}

/// Geocoder for runs without network access: every lookup fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn reverse_geocode(&self, _: f64, _: f64) -> GeocodingResult<GeocodedPlace> {
        Err(GeocodingError::Unavailable("offline mode".to_string()))
    }
}

/// Country and city of a coordinate, or nothing when the lookup fails.
pub async fn extract_country_and_city<G: ReverseGeocoder + ?Sized>(
    geocoder: &G,
    latitude: f64,
    longitude: f64,
) -> (Option<String>, Option<String>) {
    match geocoder.reverse_geocode(latitude, longitude).await {
        Ok(place) => (place.country, place.city),
        Err(e) => {
            warn!("Could not extract country and city for ({latitude}, {longitude}): {e}");
            (None, None)
        }
    }
}
