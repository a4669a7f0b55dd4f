//! # ESC/POS Raster Graphics
//!
//! ## Bit Packing
//!
//! Each bit is one dot, MSB = leftmost, 1 = black:
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};
use crate::render::Raster;

/// Mode byte `m` for GS v 0: normal scale, one dot per bit.
const RASTER_MODE_NORMAL: u8 = 0;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// - `xL, xH`: width in **bytes**, little-endian
/// - `yL, yH`: height in dots, little-endian
/// - `k = width_bytes × height`
///
/// ```
/// use weatherslip::protocol::graphics;
///
/// let data = vec![0xAA; 32 * 256];
/// let cmd = graphics::raster(256, 256, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 32, 0, 0x00, 0x01]);
/// assert_eq!(cmd.len(), 8 + 32 * 256);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);

    debug_assert!(
        data.len() == width_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * height as usize,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', RASTER_MODE_NORMAL, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

/// Raster command for a packed [`Raster`].
pub fn raster_image(image: &Raster) -> Vec<u8> {
    raster(image.width_dots, image.height, &image.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 32 * 100];
        let cmd = raster(256, 100, &data);

        assert_eq!(cmd[0], 0x1D); // GS
        assert_eq!(cmd[1], 0x76); // 'v'
        assert_eq!(cmd[2], 0x30); // '0'
        assert_eq!(cmd[3], 0); // m
        assert_eq!(cmd[4], 32); // xL
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 100); // yL
        assert_eq!(cmd[7], 0); // yH
    }

    #[test]
    fn test_raster_large_dimensions() {
        let data = vec![0x00; 258 * 300];
        let cmd = raster(2064, 300, &data);

        // 258 bytes = 0x0102, 300 rows = 0x012C
        assert_eq!(&cmd[4..8], &[0x02, 0x01, 0x2C, 0x01]);
    }

    #[test]
    fn test_raster_width_rounding() {
        let data = vec![0xFF; 2 * 4];
        let cmd = raster(9, 4, &data);
        assert_eq!(cmd[4], 2);
    }

    #[test]
    fn test_raster_single_byte() {
        let cmd = raster(8, 1, &[0x0F]);
        assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0x00, 1, 0, 1, 0, 0x0F]);
    }

    #[test]
    fn test_raster_image_preserves_data() {
        let image = Raster {
            width_dots: 16,
            height: 2,
            data: vec![1, 2, 3, 4],
        };
        let cmd = raster_image(&image);
        assert_eq!(&cmd[8..], &[1, 2, 3, 4]);
    }
}
