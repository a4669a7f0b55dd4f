//! # Location Resolution
//!
//! Works out where to fetch the forecast for. Sources are consulted as whole
//! groups, in priority order:
//!
//! 1. Positional arguments `LATITUDE LONGITUDE TIMEZONE`
//! 2. Environment variables `LATITUDE`, `LONGITUDE`, `TIMEZONE`
//! 3. [`DEFAULT_LOCATION`] (London)
//!
//! A group is never mixed with another: either all three values come from
//! one source or the resolution fails.

use std::fmt;

use chrono_tz::Tz;

use crate::error::WeatherslipError;

/// Environment variable names, in the order (latitude, longitude, timezone).
pub const ENV_VARS: [&str; 3] = ["LATITUDE", "LONGITUDE", "TIMEZONE"];

/// Built-in fallback: London, UK.
pub const DEFAULT_LOCATION: Location = Location {
    latitude: 51.5072,
    longitude: -0.1276,
    timezone: Tz::Europe__London,
};

/// A resolved forecast location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Decimal degrees, -90..=90
    pub latitude: f64,
    /// Decimal degrees, -180..=180
    pub longitude: f64,
    /// IANA timezone used for the API's day boundaries
    pub timezone: Tz,
}

/// Where a [`Location`] came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Arguments,
    Environment,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Arguments => f.write_str("command-line arguments"),
            Source::Environment => f.write_str("environment"),
            Source::Default => f.write_str("built-in default"),
        }
    }
}

impl Location {
    /// Parse and validate a location from its three textual parts.
    ///
    /// ## Example
    ///
    /// ```
    /// use weatherslip::location::Location;
    ///
    /// let loc = Location::parse("48.8566", "2.3522", "Europe/Paris")?;
    /// assert_eq!(loc.timezone.name(), "Europe/Paris");
    /// # Ok::<(), weatherslip::WeatherslipError>(())
    /// ```
    pub fn parse(latitude: &str, longitude: &str, timezone: &str) -> Result<Self, WeatherslipError> {
        let latitude = parse_coordinate("latitude", latitude, 90.0)?;
        let longitude = parse_coordinate("longitude", longitude, 180.0)?;
        let timezone = timezone.trim().parse::<Tz>().map_err(|_| {
            WeatherslipError::InvalidInput(format!(
                "'{}' is not a recognised IANA timezone",
                timezone
            ))
        })?;

        Ok(Self {
            latitude,
            longitude,
            timezone,
        })
    }
}

fn parse_coordinate(name: &str, raw: &str, limit: f64) -> Result<f64, WeatherslipError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        WeatherslipError::InvalidInput(format!("{} '{}' is not a number", name, raw))
    })?;

    if !value.is_finite() || value.abs() > limit {
        return Err(WeatherslipError::InvalidInput(format!(
            "{} {} is outside -{}..={}",
            name, value, limit, limit
        )));
    }

    Ok(value)
}

/// Resolve the location from positional arguments, then the environment,
/// then the default.
///
/// `env` looks up a variable by name; pass `|k| std::env::var(k).ok()` in
/// production. Empty values count as unset.
pub fn resolve<F>(args: &[String], env: F) -> Result<(Location, Source), WeatherslipError>
where
    F: Fn(&str) -> Option<String>,
{
    match args {
        [] => {}
        [lat, lon, tz] => return Ok((Location::parse(lat, lon, tz)?, Source::Arguments)),
        _ => {
            return Err(WeatherslipError::InvalidInput(format!(
                "expected LATITUDE LONGITUDE TIMEZONE together, got {} argument(s)",
                args.len()
            )));
        }
    }

    let values = ENV_VARS.map(|key| env(key).filter(|v| !v.trim().is_empty()));
    match values {
        [Some(lat), Some(lon), Some(tz)] => {
            Ok((Location::parse(&lat, &lon, &tz)?, Source::Environment))
        }
        [None, None, None] => Ok((DEFAULT_LOCATION, Source::Default)),
        partial => {
            let missing: Vec<&str> = ENV_VARS
                .iter()
                .zip(partial.iter())
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| *k)
                .collect();
            Err(WeatherslipError::InvalidInput(format!(
                "LATITUDE, LONGITUDE and TIMEZONE must be set together (missing {})",
                missing.join(", ")
            )))
        }
    }
}
