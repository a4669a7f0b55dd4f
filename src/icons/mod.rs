//! # Weather Icons
//!
//! Maps WMO weather codes to SVG files from the
//! [weather-icons](https://github.com/erikflowers/weather-icons) pack.
//!
//! ## Code Table
//!
//! | Codes | Icon |
//! |-------|------|
//! | 0 | wi-day-sunny |
//! | 1 | wi-day-cloudy |
//! | 2, 3 | wi-cloudy |
//! | 45, 48 | wi-fog |
//! | 51, 53, 55 | wi-sprinkle |
//! | 56, 57, 66, 67 | wi-sleet |
//! | 61 | wi-day-rain |
//! | 63, 65 | wi-rain |
//! | 71, 73, 75, 77 | wi-snow |
//! | 80 | wi-day-showers |
//! | 81, 82 | wi-showers |
//! | 85, 86 | wi-day-snow |
//! | 95 | wi-thunderstorm |
//! | 96, 99 | wi-storm-showers |
//! | other | wi-na |

pub mod download;

use std::path::PathBuf;

use crate::error::WeatherslipError;

/// Icon used when a code is not in [`ICON_TABLE`].
pub const FALLBACK_ICON: &str = "wi-na.svg";

/// Subdirectory of the icon pack holding the SVG files.
pub const SVG_SUBDIR: &str = "svg";

/// Default icon directory name, resolved next to the executable.
pub const DEFAULT_ICONS_DIR: &str = "weather-icons";

/// WMO code groups and the icon each group shares.
pub const ICON_TABLE: &[(&[u16], &str)] = &[
    (&[0], "wi-day-sunny.svg"),
    (&[1], "wi-day-cloudy.svg"),
    (&[2, 3], "wi-cloudy.svg"),
    (&[45, 48], "wi-fog.svg"),
    (&[51, 53, 55], "wi-sprinkle.svg"),
    (&[56, 57], "wi-sleet.svg"),
    (&[61], "wi-day-rain.svg"),
    (&[63, 65], "wi-rain.svg"),
    (&[66, 67], "wi-sleet.svg"),
    (&[71, 73, 75, 77], "wi-snow.svg"),
    (&[80], "wi-day-showers.svg"),
    (&[81, 82], "wi-showers.svg"),
    (&[85, 86], "wi-day-snow.svg"),
    (&[95], "wi-thunderstorm.svg"),
    (&[96, 99], "wi-storm-showers.svg"),
];

/// Icon file name for a weather code.
///
/// ```
/// use weatherslip::icons::icon_for_code;
///
/// assert_eq!(icon_for_code(63), "wi-rain.svg");
/// assert_eq!(icon_for_code(200), "wi-na.svg");
/// ```
pub fn icon_for_code(code: u16) -> &'static str {
    ICON_TABLE
        .iter()
        .find(|(codes, _)| codes.contains(&code))
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

/// Every distinct file the table can select, fallback included.
pub fn all_icons() -> Vec<&'static str> {
    let mut icons: Vec<&'static str> = ICON_TABLE.iter().map(|(_, icon)| *icon).collect();
    icons.push(FALLBACK_ICON);
    icons.sort_unstable();
    icons.dedup();
    icons
}

/// A local copy of the icon pack.
#[derive(Debug, Clone)]
pub struct IconSet {
    root: PathBuf,
}

impl IconSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the SVG files live in.
    pub fn svg_dir(&self) -> PathBuf {
        self.root.join(SVG_SUBDIR)
    }

    /// Path of the icon for a weather code.
    pub fn path_for(&self, code: u16) -> PathBuf {
        self.svg_dir().join(icon_for_code(code))
    }

    /// Fail early unless every icon the table can select is installed.
    ///
    /// A directory left half-filled by an interrupted download fails here
    /// too, naming the missing files.
    pub fn ensure_present(&self) -> Result<(), WeatherslipError> {
        let svg_dir = self.svg_dir();
        if !svg_dir.is_dir() {
            return Err(WeatherslipError::MissingIcons(format!(
                "{} does not exist; run with --download-icons or clone https://github.com/erikflowers/weather-icons there",
                svg_dir.display()
            )));
        }

        let missing: Vec<&str> = all_icons()
            .into_iter()
            .filter(|name| !svg_dir.join(name).is_file())
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(WeatherslipError::MissingIcons(format!(
            "{} is missing {}; run with --download-icons",
            svg_dir.display(),
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_documented_group() {
        let expected: &[(&[u16], &str)] = &[
            (&[0], "wi-day-sunny.svg"),
            (&[1], "wi-day-cloudy.svg"),
            (&[2, 3], "wi-cloudy.svg"),
            (&[45, 48], "wi-fog.svg"),
            (&[51, 53, 55], "wi-sprinkle.svg"),
            (&[56, 57, 66, 67], "wi-sleet.svg"),
            (&[61], "wi-day-rain.svg"),
            (&[63, 65], "wi-rain.svg"),
            (&[71, 73, 75, 77], "wi-snow.svg"),
            (&[80], "wi-day-showers.svg"),
            (&[81, 82], "wi-showers.svg"),
            (&[85, 86], "wi-day-snow.svg"),
            (&[95], "wi-thunderstorm.svg"),
            (&[96, 99], "wi-storm-showers.svg"),
        ];
        for (codes, icon) in expected {
            for &code in *codes {
                assert_eq!(icon_for_code(code), *icon, "code {}", code);
            }
        }
    }

    #[test]
    fn test_neighbouring_codes_differ() {
        assert_eq!(icon_for_code(61), "wi-day-rain.svg");
        assert_eq!(icon_for_code(63), "wi-rain.svg");
        assert_eq!(icon_for_code(96), "wi-storm-showers.svg");
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        for code in [4, 44, 50, 62, 100, 200, u16::MAX] {
            assert_eq!(icon_for_code(code), FALLBACK_ICON, "code {}", code);
        }
    }

    #[test]
    fn test_no_code_appears_twice() {
        let mut seen = std::collections::HashSet::new();
        for (codes, _) in ICON_TABLE {
            for code in *codes {
                assert!(seen.insert(*code), "code {} mapped twice", code);
            }
        }
    }

    #[test]
    fn test_all_icons_is_distinct_and_has_fallback() {
        let icons = all_icons();
        assert_eq!(icons.len(), 15);
        assert!(icons.contains(&FALLBACK_ICON));
    }

    #[test]
    fn test_path_for() {
        let set = IconSet::new("/opt/weather-icons");
        assert_eq!(
            set.path_for(45),
            PathBuf::from("/opt/weather-icons/svg/wi-fog.svg")
        );
    }

    #[test]
    fn test_ensure_present() {
        let dir = tempfile::tempdir().unwrap();
        let set = IconSet::new(dir.path());
        assert!(matches!(
            set.ensure_present(),
            Err(WeatherslipError::MissingIcons(_))
        ));

        let svg_dir = dir.path().join(SVG_SUBDIR);
        std::fs::create_dir(&svg_dir).unwrap();
        for name in all_icons() {
            std::fs::write(svg_dir.join(name), "<svg/>").unwrap();
        }
        assert!(set.ensure_present().is_ok());
    }

    #[test]
    fn test_ensure_present_names_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let svg_dir = dir.path().join(SVG_SUBDIR);
        std::fs::create_dir(&svg_dir).unwrap();
        std::fs::write(svg_dir.join("wi-cloudy.svg"), "<svg/>").unwrap();

        let err = IconSet::new(dir.path()).ensure_present().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, WeatherslipError::MissingIcons(_)));
        assert!(message.contains("wi-day-rain.svg"), "{}", message);
        assert!(message.contains(FALLBACK_ICON), "{}", message);
        assert!(!message.contains("wi-cloudy.svg"), "{}", message);
    }
}
