use crate::cli::{ClusterArgs, Command, OutputFormat};
use app_state::{AppSettings, GeocodingSettings};
use color_eyre::Result;
use color_eyre::eyre::{Context, ensure};
use common_services::clustering::{PhotoClusterer, distance_km, group_within_radius};
use common_services::geocoding::{
    CachedGeocoder, NominatimClient, OfflineGeocoder, ReverseGeocoder, format_place,
};
use common_types::{LibraryMediaItem, NewPin, PhotoLocation, PinSource};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs a subcommand and returns what it prints. Settings are only loaded by subcommands that
/// need them.
pub async fn run<F>(command: &Command, load_settings: F) -> Result<String>
where
    F: FnOnce() -> Result<AppSettings>,
{
    match command {
        Command::Cluster(args) => cluster_command(&load_settings()?, args).await,
        Command::Reverse {
            latitude,
            longitude,
        } => {
            let client = nominatim_client(&load_settings()?.geocoding)?;
            let place = client.reverse_geocode(*latitude, *longitude).await?;
            Ok(serde_json::to_string_pretty(&place)?)
        }
        Command::Search { query } => {
            let client = nominatim_client(&load_settings()?.geocoding)?;
            let places = client
                .search_places(query)
                .await?
                .iter()
                .map(format_place)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(serde_json::to_string_pretty(&places)?)
        }
        Command::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => Ok(distance_km(*lat1, *lon1, *lat2, *lon2).to_string()),
    }
}

fn nominatim_client(settings: &GeocodingSettings) -> Result<NominatimClient> {
    Ok(NominatimClient::with_base_url(&settings.base_url)
        .user_agent(&settings.user_agent)
        .zoom(settings.zoom)
        .maybe_timeout(settings.timeout)
        .build()?)
}

/// Geocoder used for naming clusters.
pub fn build_geocoder(
    settings: &GeocodingSettings,
    offline: bool,
) -> Result<Arc<dyn ReverseGeocoder>> {
    if offline {
        return Ok(Arc::new(OfflineGeocoder));
    }
    let client = nominatim_client(settings)?;
    if settings.cache_capacity == 0 {
        return Ok(Arc::new(client));
    }
    Ok(Arc::new(CachedGeocoder::new(client, settings.cache_capacity)))
}

/// Parses a JSON array of photos and drops the ones without valid coordinates.
pub fn parse_photos(json: &str, library: bool) -> Result<Vec<PhotoLocation>> {
    let photos: Vec<PhotoLocation> = if library {
        let items: Vec<LibraryMediaItem> = serde_json::from_str(json)?;
        let total = items.len();
        let photos: Vec<PhotoLocation> = items
            .into_iter()
            .filter_map(LibraryMediaItem::into_photo_location)
            .collect();
        info!("{} of {total} library items have a location", photos.len());
        photos
    } else {
        serde_json::from_str(json)?
    };

    let (valid, invalid): (Vec<_>, Vec<_>) = photos
        .into_iter()
        .partition(PhotoLocation::has_valid_coordinates);
    for photo in &invalid {
        warn!(
            "Skipping photo {} with invalid coordinates ({}, {})",
            photo.id, photo.latitude, photo.longitude
        );
    }
    Ok(valid)
}

pub fn read_photos(path: &Path, library: bool) -> Result<Vec<PhotoLocation>> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Cannot read photos from {}", path.display()))?;
    parse_photos(&json, library).wrap_err_with(|| format!("Invalid photo file {}", path.display()))
}

pub async fn cluster_command(settings: &AppSettings, args: &ClusterArgs) -> Result<String> {
    let photos = read_photos(&args.input, args.library)?;
    let radius_km = args.radius_km.unwrap_or(settings.clustering.radius_km);
    ensure!(
        radius_km.is_finite() && radius_km >= 0.0,
        "Radius must be a non-negative number of kilometers, got {radius_km}"
    );

    if args.output == OutputFormat::Groups {
        let groups = group_within_radius(&photos, radius_km);
        return Ok(serde_json::to_string_pretty(&groups)?);
    }

    let clusterer = PhotoClusterer::with_geocoder(build_geocoder(&settings.geocoding, args.offline)?)
        .radius_km(radius_km)
        .maybe_geocode_timeout(settings.geocoding.timeout)
        .max_concurrent_lookups(settings.geocoding.max_concurrent_lookups)
        .build();
    let clusters = clusterer.cluster(&photos).await;

    if args.output == OutputFormat::Pins {
        let source = if args.library {
            PinSource::GooglePhotos
        } else {
            PinSource::Manual
        };
        let pins: Vec<NewPin> = clusters
            .into_iter()
            .map(|cluster| NewPin::from_cluster(cluster, source))
            .collect();
        return Ok(serde_json::to_string_pretty(&pins)?);
    }

    Ok(serde_json::to_string_pretty(&clusters)?)
}
