//! # Rendering Module
//!
//! Produces the printable form of the weather icon.
//!
//! ## Modules
//!
//! - [`rasterize`]: SVG to grayscale [`Bitmap`] via a swappable renderer
//! - [`dither`]: grayscale to packed 1-bit rows
//!
//! ## Usage Example
//!
//! ```
//! use image::{GrayImage, Luma};
//! use weatherslip::render::{Bitmap, dither::DitheringAlgorithm};
//!
//! let bitmap = Bitmap::new(GrayImage::from_pixel(12, 2, Luma([0])));
//! let raster = bitmap.to_raster(DitheringAlgorithm::default(), false)?;
//!
//! assert_eq!(raster.width_dots, 16); // padded to a whole byte
//! assert_eq!(raster.data, vec![0xFF, 0xF0, 0xFF, 0xF0]);
//! # Ok::<(), weatherslip::WeatherslipError>(())
//! ```

pub mod dither;
pub mod rasterize;

use image::{GrayImage, imageops};

use crate::error::WeatherslipError;
use dither::DitheringAlgorithm;

/// A grayscale image with transparency already resolved.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: GrayImage,
}

/// Packed monochrome image data ready for a raster command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in dots, always a multiple of 8
    pub width_dots: u16,
    /// Height in dots
    pub height: u16,
    /// `width_dots / 8 * height` bytes, 1 = black
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    /// Dither into printer raster data, optionally flipped top to bottom.
    pub fn to_raster(
        &self,
        algorithm: DitheringAlgorithm,
        flip_vertical: bool,
    ) -> Result<Raster, WeatherslipError> {
        let flipped;
        let image = if flip_vertical {
            flipped = imageops::flip_vertical(&self.image);
            &flipped
        } else {
            &self.image
        };

        let (width, height) = image.dimensions();
        let padded_width = width.div_ceil(8) * 8;
        let width_dots = u16::try_from(padded_width)
            .map_err(|_| WeatherslipError::Render(format!("bitmap width {} too large", width)))?;
        let height_dots = u16::try_from(height)
            .map_err(|_| WeatherslipError::Render(format!("bitmap height {} too large", height)))?;

        let intensity: Vec<f32> = image
            .pixels()
            .map(|p| 1.0 - (p[0] as f32 / 255.0))
            .collect();
        let data = dither::dither(&intensity, width as usize, height as usize, algorithm);

        Ok(Raster {
            width_dots,
            height: height_dots,
            data,
        })
    }
}
