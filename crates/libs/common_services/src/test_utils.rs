//! Photo fixtures and geocoder doubles shared by the unit tests.

use crate::geocoding::{GeocodingError, GeocodingResult, ReverseGeocoder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common_types::{GeocodedPlace, PhotoLocation};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn photo(id: &str, latitude: f64, longitude: f64, timestamp_secs: i64) -> PhotoLocation {
    PhotoLocation {
        id: id.to_string(),
        latitude,
        longitude,
        timestamp: DateTime::<Utc>::from_timestamp(timestamp_secs, 0).expect("valid timestamp"),
        filename: format!("{id}.jpg"),
        mime_type: "image/jpeg".to_string(),
    }
}

/// Photos scattered uniformly within `spread_deg` of `center`, with shuffled timestamps.
pub fn random_photos(
    rng: &mut fastrand::Rng,
    count: usize,
    center: (f64, f64),
    spread_deg: f64,
) -> Vec<PhotoLocation> {
    (0..count)
        .map(|i| {
            let latitude = center.0 + (rng.f64() * 2.0 - 1.0) * spread_deg;
            let longitude = center.1 + (rng.f64() * 2.0 - 1.0) * spread_deg;
            let timestamp = 1_700_000_000 + rng.i64(0..10_000_000);
            photo(&format!("p{i}"), latitude, longitude, timestamp)
        })
        .collect()
}

/// Names every location after its rounded coordinates and counts lookups.
#[derive(Default)]
pub struct CountingGeocoder {
    pub calls: AtomicUsize,
}

impl CountingGeocoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReverseGeocoder for CountingGeocoder {
    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> GeocodingResult<GeocodedPlace> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeocodedPlace {
            display_name: format!("Place near {latitude:.2}/{longitude:.2}"),
            country: Some("Testland".to_string()),
            city: Some("Testville".to_string()),
            state: None,
        })
    }
}

pub struct FailingGeocoder;

#[async_trait]
impl ReverseGeocoder for FailingGeocoder {
    async fn reverse_geocode(&self, _: f64, _: f64) -> GeocodingResult<GeocodedPlace> {
        Err(GeocodingError::Unavailable("network is down".to_string()))
    }
}

/// Returns a place with an empty name.
pub struct BlankGeocoder;

#[async_trait]
impl ReverseGeocoder for BlankGeocoder {
    async fn reverse_geocode(&self, _: f64, _: f64) -> GeocodingResult<GeocodedPlace> {
        Ok(GeocodedPlace::named("  "))
    }
}

pub struct SlowGeocoder {
    pub delay: Duration,
}

#[async_trait]
impl ReverseGeocoder for SlowGeocoder {
    async fn reverse_geocode(&self, _: f64, _: f64) -> GeocodingResult<GeocodedPlace> {
        tokio::time::sleep(self.delay).await;
        Ok(GeocodedPlace::named("Too late"))
    }
}
