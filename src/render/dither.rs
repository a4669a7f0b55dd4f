//! # Dithering
//!
//! Converts a grayscale intensity buffer into packed 1-bit rows for the
//! printer's raster command.
//!
//! Intensity follows printer semantics: `0.0` is white (no dot), `1.0` is
//! black (dot). Icons from the weather pack are mostly flat black on white,
//! so the algorithm matters mainly on anti-aliased edges.
//!
//! | Algorithm | Behaviour |
//! |-----------|-----------|
//! | Floyd-Steinberg | Error diffusion, smooth edges (default) |
//! | Bayer | 8x8 ordered screen, deterministic per pixel |
//! | Threshold | Hard cut at 50% |
//!
//! ## Bit Packing
//!
//! - Bit 7 (MSB) = leftmost pixel
//! - 1 = black (print), 0 = white
//! - Rows are padded on the right with white up to a multiple of 8

use std::fmt;
use std::str::FromStr;

/// Bayer 8x8 dithering matrix (values 0-63)
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Algorithm used to reduce grayscale to black and white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitheringAlgorithm {
    #[default]
    FloydSteinberg,
    Bayer,
    Threshold,
}

impl FromStr for DitheringAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "floyd-steinberg" | "floyd_steinberg" | "fs" => Ok(Self::FloydSteinberg),
            "bayer" => Ok(Self::Bayer),
            "threshold" | "none" => Ok(Self::Threshold),
            other => Err(format!(
                "unknown dithering algorithm '{}' (expected floyd-steinberg, bayer or threshold)",
                other
            )),
        }
    }
}

impl fmt::Display for DitheringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FloydSteinberg => "floyd-steinberg",
            Self::Bayer => "bayer",
            Self::Threshold => "threshold",
        })
    }
}

/// Bayer threshold for a pixel position, in (0, 1).
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Pack a row of pixels (true = black) into bytes, MSB first.
///
/// ```
/// use weatherslip::render::dither::pack_row;
///
/// let row = vec![true, true, true, true, false, false, false, false];
/// assert_eq!(pack_row(&row), vec![0xF0]);
///
/// // 12 pixels pack into 2 bytes (4 bits padding)
/// assert_eq!(pack_row(&[true; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

/// Dither an intensity buffer (row-major, `width * height`) into packed rows.
///
/// Returns `width.div_ceil(8) * height` bytes.
pub fn dither(intensity: &[f32], width: usize, height: usize, algorithm: DitheringAlgorithm) -> Vec<u8> {
    debug_assert_eq!(intensity.len(), width * height);

    let dots = match algorithm {
        DitheringAlgorithm::FloydSteinberg => floyd_steinberg(intensity, width, height),
        DitheringAlgorithm::Bayer => intensity
            .iter()
            .enumerate()
            .map(|(i, &v)| v > threshold(i % width.max(1), i / width.max(1)))
            .collect(),
        DitheringAlgorithm::Threshold => intensity.iter().map(|&v| v >= 0.5).collect(),
    };

    let mut data = Vec::with_capacity(width.div_ceil(8) * height);
    for row in dots.chunks(width.max(1)).take(height) {
        data.extend(pack_row(row));
    }
    data
}

fn floyd_steinberg(intensity: &[f32], width: usize, height: usize) -> Vec<bool> {
    let mut buf = intensity.to_vec();
    let mut dots = vec![false; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = buf[idx];
            let black = old >= 0.5;
            dots[idx] = black;
            let error = old - if black { 1.0 } else { 0.0 };

            if x + 1 < width {
                buf[idx + 1] += error * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    buf[idx + width - 1] += error * 3.0 / 16.0;
                }
                buf[idx + width] += error * 5.0 / 16.0;
                if x + 1 < width {
                    buf[idx + width + 1] += error / 16.0;
                }
            }
        }
    }

    dots
}
