//! # Print Job
//!
//! Runs the whole pipeline up to (but not including) writing bytes:
//! fetch the forecast, pick and rasterize the icon, lay out the slip.
//!
//! Every fallible step happens before anything is returned, so a caller
//! either gets a complete job or an error and never a partial print.

use std::io::Write;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::WeatherslipError;
use crate::forecast::{self, DailyForecast, ForecastQuery};
use crate::icons::IconSet;
use crate::location::Location;
use crate::receipt::ForecastReceipt;
use crate::render::dither::DitheringAlgorithm;
use crate::render::rasterize::{ICON_SIZE, IconRenderer, WHITE};

/// Knobs for a single print job.
#[derive(Debug, Clone)]
pub struct JobOptions {
    pub api_url: String,
    pub dither: DitheringAlgorithm,
    /// Flip the icon top to bottom before printing
    pub flip_image: bool,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            api_url: forecast::DEFAULT_API_URL.to_string(),
            dither: DitheringAlgorithm::default(),
            flip_image: false,
        }
    }
}

/// A fully built print job.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub forecast: DailyForecast,
    pub bytes: Vec<u8>,
}

impl PrintJob {
    /// Write the job in one go and flush.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), WeatherslipError> {
        out.write_all(&self.bytes)?;
        out.flush()?;
        Ok(())
    }
}

/// Build the print job for `location`, dated `date`.
pub async fn build_print_job<R: IconRenderer + ?Sized>(
    client: &reqwest::Client,
    options: &JobOptions,
    location: &Location,
    icons: &IconSet,
    renderer: &R,
    date: NaiveDate,
) -> Result<PrintJob, WeatherslipError> {
    let query = ForecastQuery::new(*location);
    let forecast = forecast::fetch_forecast(client, &options.api_url, &query).await?;
    info!(
        code = forecast.weather_code,
        min = forecast.temp_min_c,
        max = forecast.temp_max_c,
        precip = forecast.precip_probability_percent,
        "forecast fetched"
    );

    let icon_path = icons.path_for(forecast.weather_code);
    debug!(icon = %icon_path.display(), "selected icon");

    let bitmap = renderer.render(&icon_path, ICON_SIZE, ICON_SIZE, WHITE)?;
    let raster = bitmap.to_raster(options.dither, options.flip_image)?;
    debug!(
        width = raster.width_dots,
        height = raster.height,
        dither = %options.dither,
        "icon rasterized"
    );

    let bytes = ForecastReceipt::new(&forecast, &raster, date).build();
    Ok(PrintJob { forecast, bytes })
}
