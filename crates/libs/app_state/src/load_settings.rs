use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// Load settings from `config/settings.yaml`, `.env` and `APP__*` environment variables.
pub fn load_app_settings() -> Result<AppSettings> {
    load_settings_from_path(Path::new(DEFAULT_SETTINGS_PATH), Some(Path::new(".env")))
}

/// Load settings from an explicit YAML file, optionally reading a dotenv file first so it can
/// override values through the environment.
pub fn load_settings_from_path(settings_file: &Path, env_file: Option<&Path>) -> Result<AppSettings> {
    if let Some(env_file) = env_file {
        dotenv::from_path(env_file).ok();
    }
    let config_path = settings_file.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
