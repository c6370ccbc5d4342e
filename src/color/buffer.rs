//! Conversion between flat RGBA byte buffers and color sequences

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};

/// Number of bytes per pixel in a flat RGBA buffer
pub const CHANNELS: usize = 4;

/// Split a flat RGBA buffer into colors, preserving scan order
///
/// # Errors
///
/// Returns an error if the buffer length is not a multiple of four
pub fn colors_from_rgba(bytes: &[u8]) -> Result<Vec<Color>> {
    let chunks = bytes.chunks_exact(CHANNELS);
    if !chunks.remainder().is_empty() {
        return Err(invalid_parameter(
            "rgba buffer",
            &bytes.len(),
            &"length must be a multiple of 4",
        ));
    }

    Ok(chunks
        .map(|px| {
            <[u8; CHANNELS]>::try_from(px)
                .map(Color::from)
                .unwrap_or_default()
        })
        .collect())
}

/// Pack colors back into a flat RGBA buffer in the same order
pub fn colors_to_rgba(colors: &[Color]) -> Vec<u8> {
    colors
        .iter()
        .flat_map(|&c| <[u8; CHANNELS]>::from(c))
        .collect()
}
