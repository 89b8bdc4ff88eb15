use app_state::{AppSettings, load_settings_from_path};
use clap::Parser;
use color_eyre::Result;
use pinspot::cli::Cli;
use pinspot::commands::run;
use pinspot::logging::init_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let load_settings = || -> Result<AppSettings> {
        let settings = load_settings_from_path(&cli.config, Some(Path::new(".env")))?;
        init_logging(&settings.logging.level)?;
        Ok(settings)
    };

    let output = run(&cli.command, load_settings).await?;
    println!("{output}");

    Ok(())
}
