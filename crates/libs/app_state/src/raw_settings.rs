use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (after env overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub clustering: RawClusteringSettings,
    pub geocoding: RawGeocodingSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawClusteringSettings {
    /// Photos within this distance (km) of a cluster's seed photo join that cluster.
    pub radius_km: f64,
}

/// Reverse geocoding through a Nominatim compatible endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct RawGeocodingSettings {
    pub base_url: String,
    /// Nominatim refuses requests without an identifying User-Agent.
    pub user_agent: String,
    /// Nominatim detail level, 10 is roughly city level.
    pub zoom: u8,
    /// Per lookup timeout, 0 disables it.
    pub timeout_ms: u64,
    pub max_concurrent_lookups: usize,
    /// Number of cached lookups, 0 disables the cache.
    pub cache_capacity: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}
