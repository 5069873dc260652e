//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for PNG decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream does not start with the 8-byte PNG signature.
    #[error("Invalid PNG signature")]
    InvalidSignature,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete PNG file: {0}")]
    CorruptedFile(String),

    /// Samples wider than 8 bits cannot be expanded into the output format.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u8),
}

/// Channel composition of decoded pixel samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorLayout {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
    /// Single luminance sample.
    Gray,
    /// Luminance followed by alpha.
    GrayAlpha,
    /// Indexed color.
    Palette,
    /// Anything else.
    Unsupported,
}

impl ColorLayout {
    /// Number of interleaved samples per pixel, for layouts the encoder accepts.
    #[inline]
    pub fn samples_per_pixel(self) -> Option<usize> {
        match self {
            ColorLayout::Rgb => Some(3),
            ColorLayout::Rgba => Some(4),
            ColorLayout::Gray => Some(1),
            ColorLayout::GrayAlpha => Some(2),
            ColorLayout::Palette | ColorLayout::Unsupported => None,
        }
    }

    /// Returns true if the encoder can convert this layout.
    #[inline]
    pub fn is_supported(self) -> bool {
        self.samples_per_pixel().is_some()
    }

    /// Short name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorLayout::Rgb => "RGB",
            ColorLayout::Rgba => "RGBA",
            ColorLayout::Gray => "GRAY",
            ColorLayout::GrayAlpha => "GRAYA",
            ColorLayout::Palette => "PALETTE",
            ColorLayout::Unsupported => "unknown",
        }
    }
}

impl std::fmt::Display for ColorLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How indexed-color PNGs are handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalettePolicy {
    /// Report the image as [`ColorLayout::Palette`], which the encoder refuses.
    #[default]
    Reject,
    /// Convert the palette-expanded RGB or RGBA samples.
    Expand,
}

/// A decoded image with 8-bit interleaved samples.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: ColorLayout,
    /// Samples in row-major order, rows packed without padding.
    /// Length should be width * height * samples per pixel. For layouts the
    /// encoder does not accept the buffer is carried uninterpreted.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions, layout and samples.
    pub fn new(width: u32, height: u32, layout: ColorLayout, pixels: Vec<u8>) -> Self {
        if let Some(spp) = layout.samples_per_pixel() {
            debug_assert_eq!(
                pixels.len(),
                width as usize * height as usize * spp,
                "Pixel buffer size mismatch"
            );
        }
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Bytes per scanline, if the layout is one the encoder understands.
    pub fn row_len(&self) -> Option<usize> {
        self.layout
            .samples_per_pixel()
            .map(|spp| self.width as usize * spp)
    }

    /// Iterate over scanlines top to bottom.
    ///
    /// Yields nothing for unsupported layouts or zero-width images.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_len = self.row_len().unwrap_or(0);
        let pixels: &[u8] = if row_len == 0 { &[] } else { &self.pixels };
        pixels.chunks_exact(row_len.max(1))
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
