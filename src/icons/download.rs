//! Icon pack download for `--download-icons`.
//!
//! Only the SVGs the code table can select are fetched, one request each.

use std::fs;

use tracing::{debug, info};

use super::{IconSet, all_icons};
use crate::error::WeatherslipError;

/// Raw file base URL of the upstream icon pack.
pub const DEFAULT_ICONS_URL: &str =
    "https://raw.githubusercontent.com/erikflowers/weather-icons/master/svg";

/// Download every icon into `icons.svg_dir()`, creating it if needed.
///
/// Returns the number of files written.
pub async fn download_icons(
    client: &reqwest::Client,
    base_url: &str,
    icons: &IconSet,
) -> Result<usize, WeatherslipError> {
    let svg_dir = icons.svg_dir();
    fs::create_dir_all(&svg_dir)?;

    let base = base_url.trim_end_matches('/');
    let names = all_icons();
    for name in &names {
        let url = format!("{}/{}", base, name);
        debug!(%url, "downloading icon");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherslipError::Fetch(format!("Failed to download {}: {}", url, e)))?;
        if !response.status().is_success() {
            return Err(WeatherslipError::Fetch(format!(
                "Failed to download {}: HTTP {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherslipError::Fetch(format!("Failed to read {}: {}", url, e)))?;
        if bytes.is_empty() {
            return Err(WeatherslipError::Fetch(format!("{} returned an empty file", url)));
        }

        fs::write(svg_dir.join(name), &bytes)?;
    }

    info!(count = names.len(), dir = %svg_dir.display(), "icons downloaded");
    Ok(names.len())
}
