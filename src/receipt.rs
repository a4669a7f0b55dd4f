//! # Forecast Receipt
//!
//! Lays out the printed slip. The byte stream is, in order:
//!
//! ```text
//! GS ! 0x11                 double width + height
//! LF
//! 40% (2h) LF               precipitation chance and hours
//! Min: 10 LF
//! Max: 16 LF
//! GS v 0 ...                weather icon raster
//! LF
//! 5th Mar 2025 LF
//! GS ! 0x00                 normal size
//! LF LF LF                  clear the cutter
//! ```

use chrono::{Datelike, NaiveDate};

use crate::forecast::DailyForecast;
use crate::protocol::{commands, graphics};
use crate::render::Raster;

/// Line feeds after the date so the slip clears the cutter.
pub const TRAILING_FEED_LINES: usize = 3;

/// A forecast slip ready to be encoded.
#[derive(Debug, Clone)]
pub struct ForecastReceipt<'a> {
    forecast: &'a DailyForecast,
    icon: &'a Raster,
    date: NaiveDate,
}

impl<'a> ForecastReceipt<'a> {
    pub fn new(forecast: &'a DailyForecast, icon: &'a Raster, date: NaiveDate) -> Self {
        Self {
            forecast,
            icon,
            date,
        }
    }

    /// The three summary lines printed above the icon.
    pub fn summary_lines(&self) -> [String; 3] {
        [
            format!(
                "{}% ({}h)",
                self.forecast.precip_probability_percent, self.forecast.precip_hours
            ),
            format!("Min: {}", self.forecast.temp_min_rounded()),
            format!("Max: {}", self.forecast.temp_max_rounded()),
        ]
    }

    /// Encode the whole slip.
    pub fn build(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(64 + self.icon.data.len());

        data.extend(commands::size_double());
        data.extend(commands::feed_lines(1));
        for line in self.summary_lines() {
            data.extend(commands::text_line(&line));
        }
        data.extend(graphics::raster_image(self.icon));
        data.extend(commands::feed_lines(1));
        data.extend(commands::text_line(&format_date_with_ordinal(self.date)));
        data.extend(commands::size_normal());
        data.extend(commands::feed_lines(TRAILING_FEED_LINES));

        data
    }
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Format a date as `5th Mar 2025`.
///
/// ```
/// use chrono::NaiveDate;
/// use weatherslip::receipt::format_date_with_ordinal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// assert_eq!(format_date_with_ordinal(date), "5th Mar 2025");
/// ```
pub fn format_date_with_ordinal(date: NaiveDate) -> String {
    format!(
        "{}{} {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%b %Y")
    )
}
