//! # Error Types
//!
//! This module defines error types used throughout the weatherslip pipeline.
//! Every variant is fatal: the binary reports it on stderr and exits non-zero
//! before anything reaches the printer.

use thiserror::Error;

/// Main error type for weatherslip operations
#[derive(Debug, Error)]
pub enum WeatherslipError {
    /// Bad coordinates, timezone, or an incomplete location group
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network or transport failure (unreachable host, empty body)
    #[error("Error fetching weather data: {0}")]
    Fetch(String),

    /// The forecast API answered with an `error` payload
    #[error("Error from weather API: {0}")]
    Api(String),

    /// Response did not have the expected shape
    #[error("Unexpected API response format: {0}")]
    Parse(String),

    /// Icon directory is not where we expect it
    #[error("Weather icons not found: {0}")]
    MissingIcons(String),

    /// Vector-to-raster conversion failed
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
