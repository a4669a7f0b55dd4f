//! # ESC/POS Basic Commands
//!
//! Control bytes for text size and paper feed.
//!
//! ## Escape Sequence Structure
//!
//! - Single byte: `LF`
//! - Multi-byte with parameters: `GS ! n`, `GS v 0 m xL xH yL yH d1...dk`
//!
//! Multi-byte integers are **little-endian**: `u16` 0x1234 is sent as
//! `[0x34, 0x12]`.

/// GS (Group Separator) - Prefix for size and graphics commands
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// # Select Character Size (GS ! n)
///
/// Scales subsequent text. Bits 4-6 of `n` hold the width multiplier minus
/// one, bits 0-2 the height multiplier minus one.
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS ! n   |
/// | Hex     | 1D 21 n  |
///
/// Multipliers are clamped to 1..=8.
///
/// ```
/// use weatherslip::protocol::commands;
///
/// assert_eq!(commands::character_size(2, 2), vec![0x1D, 0x21, 0x11]);
/// assert_eq!(commands::character_size(1, 1), vec![0x1D, 0x21, 0x00]);
/// ```
pub fn character_size(width_mult: u8, height_mult: u8) -> Vec<u8> {
    let w = width_mult.clamp(1, 8) - 1;
    let h = height_mult.clamp(1, 8) - 1;
    vec![GS, b'!', (w << 4) | h]
}

/// Double width and double height (GS ! 0x11)
#[inline]
pub fn size_double() -> Vec<u8> {
    character_size(2, 2)
}

/// Normal size text (GS ! 0x00)
#[inline]
pub fn size_normal() -> Vec<u8> {
    character_size(1, 1)
}

/// Print a line of text followed by LF.
pub fn text_line(text: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(text.len() + 1);
    cmd.extend_from_slice(text.as_bytes());
    cmd.push(LF);
    cmd
}

/// `n` line feeds.
#[inline]
pub fn feed_lines(n: usize) -> Vec<u8> {
    vec![LF; n]
}

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use weatherslip::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(256), [0x00, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_double() {
        assert_eq!(size_double(), vec![0x1D, 0x21, 0x11]);
    }

    #[test]
    fn test_size_normal() {
        assert_eq!(size_normal(), vec![0x1D, 0x21, 0x00]);
    }

    #[test]
    fn test_character_size_clamps() {
        assert_eq!(character_size(0, 0), vec![0x1D, 0x21, 0x00]);
        assert_eq!(character_size(9, 3), vec![0x1D, 0x21, 0x72]);
    }

    #[test]
    fn test_text_line() {
        assert_eq!(text_line("Min: 10"), b"Min: 10\n".to_vec());
        assert_eq!(text_line(""), vec![LF]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(3), vec![0x0A, 0x0A, 0x0A]);
        assert!(feed_lines(0).is_empty());
    }
}
