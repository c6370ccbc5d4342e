//! Color values and the operations the assignment algorithms need on them
//!
//! This module contains:
//! - The immutable four-channel `Color` value type
//! - The squared RGB distance used as the assignment cost
//! - Conversion between flat RGBA byte buffers and color sequences

/// Flat RGBA buffer extraction and packing
pub mod buffer;
/// Color dissimilarity metrics
pub mod distance;
/// Four-channel 8-bit color value
pub mod pixel;

pub use distance::{euclidean_distance, squared_distance};
pub use pixel::Color;
