//! # ESC/POS Protocol
//!
//! Low-level command builders for ESC/POS thermal receipt printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Text size, line feeds, byte helpers
//! - [`graphics`]: Raster bit images (GS v 0)
//!
//! ## Usage Example
//!
//! ```
//! use weatherslip::protocol::{commands, graphics};
//!
//! let mut data = Vec::new();
//! data.extend(commands::size_double());
//! data.extend(commands::text_line("Max: 16"));
//! data.extend(graphics::raster(8, 1, &[0xAA]));
//! data.extend(commands::size_normal());
//! data.extend(commands::feed_lines(3));
//! ```

pub mod commands;
pub mod graphics;
