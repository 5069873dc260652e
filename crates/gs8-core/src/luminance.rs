//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! The display firmware expects the exact bytes produced by a plain
//! `(int)(0.299*r + 0.587*g + 0.114*b)` in double precision, so the weighted
//! sum is evaluated left to right in `f64` and truncated, never rounded.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f64 = 0.114;

/// Weighted sum of 8-bit RGB samples, before truncation.
///
/// # Returns
/// Luminance value (0.0 to 255.0)
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}

/// Calculate luminance from u8 RGB values (0 to 255).
///
/// The fractional part is discarded. A gray pixel `(v, v, v)` can therefore
/// come out as `v - 1` when the sum lands just below `v`.
///
/// # Arguments
/// * `r` - Red channel value (0-255)
/// * `g` - Green channel value (0-255)
/// * `b` - Blue channel value (0-255)
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    // `as` truncates toward zero and saturates; the sum never leaves 0..=255.
    luminance(r, g, b) as u8
}
