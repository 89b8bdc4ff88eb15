use crate::{LoggingSettings, RawSettings};
use color_eyre::eyre::{Report, bail};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub clustering: ClusteringSettings,
    pub geocoding: GeocodingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ClusteringSettings {
    pub radius_km: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeocodingSettings {
    pub base_url: String,
    pub user_agent: String,
    pub zoom: u8,
    pub timeout: Option<Duration>,
    pub max_concurrent_lookups: usize,
    pub cache_capacity: u64,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = Report;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let radius_km = raw.clustering.radius_km;
        if !radius_km.is_finite() || radius_km < 0.0 {
            bail!("Invalid clustering.radius_km: {radius_km}");
        }

        let geocoding = GeocodingSettings {
            base_url: raw.geocoding.base_url,
            user_agent: raw.geocoding.user_agent,
            zoom: raw.geocoding.zoom,
            timeout: (raw.geocoding.timeout_ms > 0)
                .then(|| Duration::from_millis(raw.geocoding.timeout_ms)),
            max_concurrent_lookups: raw.geocoding.max_concurrent_lookups.max(1),
            cache_capacity: raw.geocoding.cache_capacity,
        };

        Ok(Self {
            clustering: ClusteringSettings { radius_km },
            geocoding,
            logging: raw.logging,
        })
    }
}
