use app_state::DEFAULT_SETTINGS_PATH;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Group geotagged photos into map pins", long_about = None)]
pub struct Cli {
    /// Settings file.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cluster photos from a JSON file into location pins.
    Cluster(ClusterArgs),
    /// Look up the place name of a coordinate.
    #[command(allow_negative_numbers = true)]
    Reverse { latitude: f64, longitude: f64 },
    /// Search places by name.
    Search { query: String },
    /// Great-circle distance in kilometers.
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
}

#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// JSON array of photos.
    pub input: PathBuf,

    /// Overrides `clustering.radius_km`.
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Input holds photo library media items instead of photo locations.
    #[arg(long, default_value_t = false)]
    pub library: bool,

    /// Skip reverse geocoding, name clusters after their coordinates.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Clusters)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Named clusters, oldest first.
    Clusters,
    /// Pins with their photos, ready for insertion.
    Pins,
    /// Unnamed groups keyed by their first photo's coordinates.
    Groups,
}
