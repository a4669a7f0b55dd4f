//! # Weatherslip - Daily Forecast Receipts
//!
//! Weatherslip prints today's weather on an ESC/POS thermal receipt printer.
//! It provides:
//!
//! - **Location resolution**: arguments, environment, or a London default
//! - **Forecast fetching**: one request to the Open-Meteo daily API
//! - **Icon selection**: WMO weather code to weather-icons SVG
//! - **Rasterization**: SVG to dithered 1-bit bitmap
//! - **Protocol implementation**: ESC/POS command builders
//!
//! ## Quick Start
//!
//! ```no_run
//! use weatherslip::{
//!     forecast, icons::IconSet, job::{self, JobOptions}, location,
//!     render::rasterize::ImageMagickRenderer,
//! };
//!
//! # async fn run() -> Result<(), weatherslip::WeatherslipError> {
//! let (location, _) = location::resolve(&[], |k| std::env::var(k).ok())?;
//! let client = forecast::http_client()?;
//! let icons = IconSet::new("weather-icons");
//! icons.ensure_present()?;
//!
//! let job = job::build_print_job(
//!     &client,
//!     &JobOptions::default(),
//!     &location,
//!     &icons,
//!     &ImageMagickRenderer::new(),
//!     chrono::Local::now().date_naive(),
//! )
//! .await?;
//!
//! job.write_to(&mut std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`location`] | Location resolution and validation |
//! | [`forecast`] | Open-Meteo request and response parsing |
//! | [`icons`] | Weather code to icon table, icon download |
//! | [`render`] | SVG rasterization and dithering |
//! | [`protocol`] | ESC/POS command builders |
//! | [`receipt`] | Slip layout |
//! | [`job`] | End-to-end pipeline |
//! | [`error`] | Error types |

pub mod error;
pub mod forecast;
pub mod icons;
pub mod job;
pub mod location;
pub mod protocol;
pub mod receipt;
pub mod render;

// Re-exports for convenience
pub use error::WeatherslipError;
pub use location::Location;
