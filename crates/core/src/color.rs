//! Color quantizer - RGB to the 256-color palette's 6x6x6 cube.
//!
//! Terminals in "256 color mode" reliably agree only on the cube entries
//! (16..=231), so the 16 system colors and the grayscale ramp are never used.

use crate::types::{AnsiColor, Rgb, Rgba, CUBE_LEVELS};

/// Round a channel to its nearest cube level (0..=5).
///
/// Equivalent to `round(channel / 255 * 5)`. `channel * 5 / 255` never lands
/// exactly on a half, so there is no tie to break.
#[inline]
pub fn cube_level(channel: u8) -> u8 {
    let max_level = (CUBE_LEVELS - 1) as u16;
    ((channel as u16 * max_level * 2 + 255) / 510) as u8
}

/// Map an RGB triple to its reduced palette color.
pub fn quantize(rgb: Rgb) -> AnsiColor {
    AnsiColor::from_cube_levels_clamped(cube_level(rgb.r), cube_level(rgb.g), cube_level(rgb.b))
}

/// Quantize the color channels of a pixel, ignoring alpha.
pub fn quantize_rgba(px: Rgba) -> AnsiColor {
    quantize(px.rgb())
}
