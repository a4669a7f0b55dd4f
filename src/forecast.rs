//! # Forecast Fetching
//!
//! Fetches today's daily forecast from the Open-Meteo API.
//!
//! One `GET` per run, no retries. The response is expected to carry a
//! `daily` object whose fields are arrays; index 0 of each array is today.
//!
//! ```text
//! GET /v1/forecast?latitude=51.5072&longitude=-0.1276
//!     &daily=weather_code,temperature_2m_max,...&timezone=Europe/London
//!     &forecast_days=1
//!
//! { "daily": { "weather_code": [61], "temperature_2m_max": [15.6], ... } }
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::WeatherslipError;
use crate::location::Location;

/// Open-Meteo forecast endpoint
pub const DEFAULT_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Daily variables requested from the API, comma-joined as the API expects.
pub const DAILY_VARIABLES: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max,precipitation_hours";

/// Forecast horizon in days
pub const FORECAST_DAYS: u8 = 1;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters for a single forecast request.
#[derive(Debug, Clone, Copy)]
pub struct ForecastQuery {
    pub location: Location,
}

impl ForecastQuery {
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    /// Query string pairs, in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.location.latitude.to_string()),
            ("longitude", self.location.longitude.to_string()),
            ("daily", DAILY_VARIABLES.to_string()),
            ("timezone", self.location.timezone.name().to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
        ]
    }
}

/// Today's forecast values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecast {
    /// WMO weather interpretation code
    pub weather_code: u16,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// 0..=100
    pub precip_probability_percent: u8,
    pub precip_hours: f64,
}

impl DailyForecast {
    /// Minimum temperature rounded to a whole degree (ties to even).
    pub fn temp_min_rounded(&self) -> i64 {
        round_degrees(self.temp_min_c)
    }

    /// Maximum temperature rounded to a whole degree (ties to even).
    pub fn temp_max_rounded(&self) -> i64 {
        round_degrees(self.temp_max_c)
    }
}

fn round_degrees(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyData,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    weather_code: Vec<Option<u16>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_probability_max: Vec<Option<u8>>,
    precipitation_hours: Vec<Option<f64>>,
}

fn today<T: Copy>(field: &str, values: &[Option<T>]) -> Result<T, WeatherslipError> {
    values.first().copied().flatten().ok_or_else(|| {
        WeatherslipError::Parse(format!("daily.{} has no value for today", field))
    })
}

/// Build the HTTP client used for all requests.
pub fn http_client() -> Result<reqwest::Client, WeatherslipError> {
    reqwest::Client::builder()
        .user_agent(concat!("weatherslip/", env!("CARGO_PKG_VERSION")))
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| WeatherslipError::Fetch(format!("HTTP client error: {}", e)))
}

/// Fetch and parse today's forecast.
pub async fn fetch_forecast(
    client: &reqwest::Client,
    api_url: &str,
    query: &ForecastQuery,
) -> Result<DailyForecast, WeatherslipError> {
    debug!(url = api_url, params = ?query.params(), "requesting forecast");

    let response = client
        .get(api_url)
        .query(&query.params())
        .send()
        .await
        .map_err(|e| WeatherslipError::Fetch(format!("{}: {}", api_url, e)))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| WeatherslipError::Fetch(format!("failed to read response body: {}", e)))?;

    debug!(%status, bytes = body.len(), "forecast response received");
    parse_response(status, &body)
}

/// Interpret a raw API response.
///
/// An `error` field wins over the HTTP status, since Open-Meteo reports
/// bad parameters as `400 {"error": true, "reason": "..."}`.
pub fn parse_response(status: StatusCode, body: &str) -> Result<DailyForecast, WeatherslipError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(WeatherslipError::Fetch(format!(
            "empty response (HTTP {})",
            status
        )));
    }

    let value: serde_json::Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(WeatherslipError::Fetch(format!("HTTP {}: {}", status, trimmed)));
        }
        Err(_) => return Err(WeatherslipError::Parse(trimmed.to_string())),
    };

    if value.get("error").is_some() {
        return Err(WeatherslipError::Api(trimmed.to_string()));
    }
    if !status.is_success() {
        return Err(WeatherslipError::Fetch(format!("HTTP {}: {}", status, trimmed)));
    }

    let response: ForecastResponse = serde_json::from_value(value)
        .map_err(|e| WeatherslipError::Parse(format!("{} ({})", trimmed, e)))?;
    let daily = response.daily;

    let forecast = DailyForecast {
        weather_code: today("weather_code", &daily.weather_code)?,
        temp_min_c: today("temperature_2m_min", &daily.temperature_2m_min)?,
        temp_max_c: today("temperature_2m_max", &daily.temperature_2m_max)?,
        precip_probability_percent: today(
            "precipitation_probability_max",
            &daily.precipitation_probability_max,
        )?,
        precip_hours: today("precipitation_hours", &daily.precipitation_hours)?,
    };

    if forecast.precip_probability_percent > 100 {
        return Err(WeatherslipError::Parse(format!(
            "precipitation_probability_max {} is above 100",
            forecast.precip_probability_percent
        )));
    }

    Ok(forecast)
}
