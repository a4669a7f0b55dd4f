//! # Icon Rasterization
//!
//! Turns an SVG icon into a small grayscale [`Bitmap`] that can be dithered
//! for the printer.
//!
//! Rendering sits behind the [`IconRenderer`] trait so the backend can be
//! swapped. The default backend shells out to ImageMagick:
//!
//! ```text
//! convert -background #ffffff -density 900 icon.svg -resize 256x256 /tmp/xxxx.png
//! ```
//!
//! The PNG lives in a [`tempfile::NamedTempFile`] and is removed when the
//! guard drops, whichever way `render` returns.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{DynamicImage, GrayImage, Rgb, RgbImage, imageops::FilterType};
use tracing::debug;

use super::Bitmap;
use crate::error::WeatherslipError;

/// Bounding box for printed icons, in dots.
pub const ICON_SIZE: u32 = 256;

/// Density passed to ImageMagick before the downscale.
pub const RENDER_DENSITY: u32 = 900;

/// Thermal paper background.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Renders a vector icon into a bitmap no larger than `max_width` x `max_height`.
///
/// Implementations must preserve the aspect ratio and composite any
/// transparency onto `background`.
pub trait IconRenderer {
    fn render(
        &self,
        svg: &Path,
        max_width: u32,
        max_height: u32,
        background: Rgb<u8>,
    ) -> Result<Bitmap, WeatherslipError>;
}

/// Renderer backed by ImageMagick's `convert`.
#[derive(Debug, Clone)]
pub struct ImageMagickRenderer {
    program: OsString,
    temp_dir: Option<PathBuf>,
}

impl Default for ImageMagickRenderer {
    fn default() -> Self {
        Self {
            program: OsString::from("convert"),
            temp_dir: None,
        }
    }
}

impl ImageMagickRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable, e.g. `magick` on ImageMagick 7.
    pub fn program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Create the intermediate PNG in `dir` instead of the system temp dir.
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    fn temp_png(&self) -> io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("weatherslip-").suffix(".png");
        match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

impl IconRenderer for ImageMagickRenderer {
    fn render(
        &self,
        svg: &Path,
        max_width: u32,
        max_height: u32,
        background: Rgb<u8>,
    ) -> Result<Bitmap, WeatherslipError> {
        if !svg.is_file() {
            return Err(WeatherslipError::MissingIcons(format!(
                "{} not found",
                svg.display()
            )));
        }

        let tmp = self.temp_png()?;
        let [r, g, b] = background.0;

        debug!(svg = %svg.display(), png = %tmp.path().display(), "rasterizing icon");
        let output = Command::new(&self.program)
            .arg("-background")
            .arg(format!("#{:02x}{:02x}{:02x}", r, g, b))
            .arg("-density")
            .arg(RENDER_DENSITY.to_string())
            .arg(svg)
            .arg("-resize")
            .arg(format!("{}x{}", max_width, max_height))
            .arg(tmp.path())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => WeatherslipError::Render(format!(
                    "'{}' command not found. ImageMagick is required.",
                    self.program.to_string_lossy()
                )),
                _ => WeatherslipError::Render(format!(
                    "failed to run '{}': {}",
                    self.program.to_string_lossy(),
                    e
                )),
            })?;

        if !output.status.success() {
            return Err(WeatherslipError::Render(format!(
                "converting {} to PNG failed ({}): {}",
                svg.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let image = image::open(tmp.path())
            .map_err(|e| WeatherslipError::Render(format!("failed to decode rendered icon: {}", e)))?;

        Ok(Bitmap::new(flatten(&image, max_width, max_height, background)))
    }
}

/// Composite `image` onto `background`, fit it inside the bounding box and
/// convert to grayscale.
pub fn flatten(image: &DynamicImage, max_width: u32, max_height: u32, background: Rgb<u8>) -> GrayImage {
    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        let mut out = [0u8; 3];
        for (c, slot) in out.iter_mut().enumerate() {
            let blended = pixel[c] as f32 * alpha + background[c] as f32 * (1.0 - alpha);
            *slot = blended.round().clamp(0.0, 255.0) as u8;
        }
        rgb.put_pixel(x, y, Rgb(out));
    }

    let mut flat = DynamicImage::ImageRgb8(rgb);
    if flat.width() > max_width || flat.height() > max_height {
        flat = flat.resize(max_width, max_height, FilterType::Lanczos3);
    }
    flat.to_luma8()
}
