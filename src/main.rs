//! # Weatherslip CLI
//!
//! Prints today's forecast to an ESC/POS thermal printer.
//!
//! ## Usage
//!
//! ```bash
//! # Default location (London), piped to the printer
//! weatherslip > /dev/usb/lp0
//!
//! # Explicit location
//! weatherslip 48.8566 2.3522 Europe/Paris > /dev/usb/lp0
//!
//! # Location from the environment, written straight to the device
//! LATITUDE=40.4168 LONGITUDE=-3.7038 TIMEZONE=Europe/Madrid \
//!     weatherslip --output /dev/usb/lp0
//!
//! # Fetch the icon pack next to the binary
//! weatherslip --download-icons
//! ```
//!
//! stdout carries printer bytes only; logs and errors go to stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use weatherslip::{
    WeatherslipError, forecast,
    icons::{self, IconSet, download},
    job::{self, JobOptions},
    location,
    render::{dither::DitheringAlgorithm, rasterize::ImageMagickRenderer},
};

/// Weatherslip - print today's weather on a receipt printer
#[derive(Parser, Debug)]
#[command(name = "weatherslip")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Latitude in decimal degrees (requires LONGITUDE and TIMEZONE)
    #[arg(value_name = "LATITUDE", requires = "longitude")]
    latitude: Option<String>,

    /// Longitude in decimal degrees
    #[arg(value_name = "LONGITUDE", requires = "timezone")]
    longitude: Option<String>,

    /// IANA timezone, e.g. Europe/London
    #[arg(value_name = "TIMEZONE")]
    timezone: Option<String>,

    /// Download the weather icon pack and exit without printing
    #[arg(long)]
    download_icons: bool,

    /// Icon pack directory (defaults to weather-icons next to the executable)
    #[arg(long, env = "WEATHERSLIP_ICONS_DIR", value_name = "DIR")]
    icons_dir: Option<PathBuf>,

    /// Base URL the icon SVGs are downloaded from
    #[arg(long, default_value = download::DEFAULT_ICONS_URL, value_name = "URL")]
    icons_url: String,

    /// Forecast API endpoint
    #[arg(long, default_value = forecast::DEFAULT_API_URL, value_name = "URL")]
    api_url: String,

    /// Write to this file or device instead of stdout
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Dithering algorithm: floyd-steinberg, bayer, threshold
    #[arg(long, default_value = "floyd-steinberg")]
    dither: DitheringAlgorithm,

    /// Flip the icon top to bottom (for printers that feed images inverted)
    #[arg(long)]
    flip_image: bool,

    /// ImageMagick executable used to rasterize icons
    #[arg(long, default_value = "convert", value_name = "PROGRAM")]
    convert: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout is reserved for the printer stream.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "weatherslip=debug"
    } else {
        "weatherslip=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

async fn run(cli: Cli) -> Result<(), WeatherslipError> {
    let icon_set = IconSet::new(cli.icons_dir.clone().unwrap_or_else(default_icons_dir));

    if cli.download_icons {
        let client = forecast::http_client()?;
        let count = download::download_icons(&client, &cli.icons_url, &icon_set).await?;
        eprintln!("Downloaded {} icons to {}", count, icon_set.svg_dir().display());
        return Ok(());
    }

    let args: Vec<String> = [&cli.latitude, &cli.longitude, &cli.timezone]
        .into_iter()
        .flatten()
        .cloned()
        .collect();
    let (location, source) = location::resolve(&args, |key| std::env::var(key).ok())?;
    info!(
        latitude = location.latitude,
        longitude = location.longitude,
        timezone = %location.timezone,
        %source,
        "location resolved"
    );

    icon_set.ensure_present()?;

    let client = forecast::http_client()?;
    let options = JobOptions {
        api_url: cli.api_url,
        dither: cli.dither,
        flip_image: cli.flip_image,
    };
    let renderer = ImageMagickRenderer::new().program(cli.convert);
    // date line uses the local clock, not the location's timezone
    let today = chrono::Local::now().date_naive();

    let print_job =
        job::build_print_job(&client, &options, &location, &icon_set, &renderer, today).await?;

    match &cli.output {
        Some(path) => {
            let mut device = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .map_err(|e| {
                    WeatherslipError::Io(io::Error::new(
                        e.kind(),
                        format!("failed to open {}: {}", path.display(), e),
                    ))
                })?;
            print_job.write_to(&mut device)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            print_job.write_to(&mut stdout)?;
        }
    }

    debug!(bytes = print_job.bytes.len(), "print job written");
    Ok(())
}

fn default_icons_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(icons::DEFAULT_ICONS_DIR)))
        .unwrap_or_else(|| PathBuf::from(icons::DEFAULT_ICONS_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_coordinates_are_positional() {
        let cli = Cli::try_parse_from(["weatherslip", "51.5072", "-0.1276", "Europe/London"]).unwrap();
        assert_eq!(cli.longitude.as_deref(), Some("-0.1276"));
        assert_eq!(cli.timezone.as_deref(), Some("Europe/London"));
    }

    #[test]
    fn test_partial_positionals_rejected() {
        assert!(Cli::try_parse_from(["weatherslip", "51.5072"]).is_err());
        assert!(Cli::try_parse_from(["weatherslip", "51.5072", "-0.1276"]).is_err());
    }

    #[test]
    fn test_dither_flag() {
        let cli = Cli::try_parse_from(["weatherslip", "--dither", "bayer"]).unwrap();
        assert_eq!(cli.dither, DitheringAlgorithm::Bayer);
        assert!(Cli::try_parse_from(["weatherslip", "--dither", "sparkle"]).is_err());
    }
}
