use crate::geocoding::{GeocodingResult, ReverseGeocoder};
use async_trait::async_trait;
use common_types::GeocodedPlace;
use moka::future::Cache;
use tracing::debug;

/// Cache key precision: 5 decimals, roughly one meter.
const KEY_SCALE: f64 = 100_000.0;

/// Memoizes successful lookups of another geocoder. Failures are not cached.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Cache<(i64, i64), GeocodedPlace>,
}

impl<G: ReverseGeocoder> CachedGeocoder<G> {
    #[must_use]
    pub fn new(inner: G, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(capacity),
        }
    }
}

fn cache_key(latitude: f64, longitude: f64) -> Option<(i64, i64)> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }
    Some((
        (latitude * KEY_SCALE).round() as i64,
        (longitude * KEY_SCALE).round() as i64,
    ))
}

#[async_trait]
impl<G: ReverseGeocoder> ReverseGeocoder for CachedGeocoder<G> {
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> GeocodingResult<GeocodedPlace> {
        let Some(key) = cache_key(latitude, longitude) else {
            return self.inner.reverse_geocode(latitude, longitude).await;
        };
        if let Some(place) = self.cache.get(&key).await {
            debug!("Geocoding cache hit for ({latitude}, {longitude})");
            return Ok(place);
        }

        let place = self.inner.reverse_geocode(latitude, longitude).await?;
        self.cache.insert(key, place.clone()).await;
        Ok(place)
    }
}
