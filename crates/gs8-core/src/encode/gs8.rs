//! GS8 encoding: one truncated BT.601 luminance byte per pixel.
//!
//! Every precondition is checked before the first byte is written, so a
//! rejected image leaves the sink untouched. Once writing starts, output is
//! handed to the sink a row at a time and a failing sink aborts the
//! remaining rows without rollback.

use std::io::{self, Write};

use thiserror::Error;

use crate::container::Gs8Header;
use crate::decode::{ColorLayout, DecodedImage};
use crate::luminance::luminance_u8;

/// Errors that can occur during GS8 encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The layout is outside RGB, RGBA, GRAY and GRAY_ALPHA
    #[error("Unsupported color layout: {0}")]
    UnsupportedColorLayout(ColorLayout),

    /// Width or height does not fit the 16-bit header fields
    #[error("Invalid dimensions: {width}x{height} exceeds 65535x65535")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions and layout
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The sink rejected a write
    #[error("Writing output failed: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Encode a decoded image as a GS8 container into `sink`.
///
/// # Arguments
///
/// * `image` - Decoded image with 8-bit samples
/// * `sink` - Destination for the header and luminance bytes
///
/// # Returns
///
/// The header that was written. Exactly `header.file_len()` bytes reach the
/// sink on success.
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedColorLayout`, `DimensionsTooLarge` or
/// `InvalidPixelData` without writing anything, and
/// `EncodeError::WriteFailed` if the sink fails part way.
pub fn encode<W: Write>(image: &DecodedImage, sink: &mut W) -> Result<Gs8Header, EncodeError> {
    let (header, spp) = validate(image)?;

    sink.write_all(&header.to_bytes())
        .map_err(EncodeError::WriteFailed)?;

    if header.payload_len() == 0 {
        return Ok(header);
    }

    let mut row_out = vec![0u8; header.width as usize];
    for row in image.rows() {
        match image.layout {
            ColorLayout::Rgb | ColorLayout::Rgba => {
                for (out, px) in row_out.iter_mut().zip(row.chunks_exact(spp)) {
                    *out = luminance_u8(px[0], px[1], px[2]);
                }
            }
            _ => {
                for (out, px) in row_out.iter_mut().zip(row.chunks_exact(spp)) {
                    *out = luminance_u8(px[0], px[0], px[0]);
                }
            }
        }
        sink.write_all(&row_out).map_err(EncodeError::WriteFailed)?;
    }

    Ok(header)
}

/// Encode into a freshly allocated buffer of exactly `4 + width * height` bytes.
pub fn encode_to_vec(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    let (header, _) = validate(image)?;
    let mut out = Vec::with_capacity(header.file_len());
    encode(image, &mut out)?;
    Ok(out)
}

/// Check layout, dimensions and buffer length; returns the header and samples per pixel.
fn validate(image: &DecodedImage) -> Result<(Gs8Header, usize), EncodeError> {
    let spp = image
        .layout
        .samples_per_pixel()
        .ok_or(EncodeError::UnsupportedColorLayout(image.layout))?;

    let header = Gs8Header::new(image.width, image.height).map_err(|_| {
        EncodeError::DimensionsTooLarge {
            width: image.width,
            height: image.height,
        }
    })?;

    let expected = header.payload_len() * spp;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok((header, spp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::HEADER_LEN;

    fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> DecodedImage {
        DecodedImage::new(width, height, ColorLayout::Rgb, pixels)
    }

    /// Sink that accepts `limit` bytes and then fails.
    struct FailingSink {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written.len();
            if room == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(room);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_encode_two_pixel_rgb() {
        let img = rgb(2, 1, vec![255, 0, 0, 0, 0, 0]);
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(out, vec![0x00, 0x02, 0x00, 0x01, 0x4C, 0x00]);
    }

    #[test]
    fn test_encode_primaries() {
        let img = rgb(
            5,
            1,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 0, 0, 0],
        );
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(&out[HEADER_LEN..], &[76, 149, 29, 255, 0]);
    }

    #[test]
    fn test_encode_row_order() {
        let img = rgb(1, 2, vec![0, 0, 0, 255, 255, 255]);
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(out, vec![0x00, 0x01, 0x00, 0x02, 0x00, 0xFF]);
    }

    #[test]
    fn test_encode_row_major_multi_row() {
        // 2x2: top row red, black; bottom row white, blue
        let img = rgb(
            2,
            2,
            vec![255, 0, 0, 0, 0, 0, 255, 255, 255, 0, 0, 255],
        );
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(&out[HEADER_LEN..], &[76, 0, 255, 29]);
    }

    #[test]
    fn test_encode_rgba_ignores_alpha() {
        let opaque = DecodedImage::new(1, 1, ColorLayout::Rgba, vec![12, 200, 77, 255]);
        let clear = DecodedImage::new(1, 1, ColorLayout::Rgba, vec![12, 200, 77, 0]);
        let plain = rgb(1, 1, vec![12, 200, 77]);

        let a = encode_to_vec(&opaque).unwrap();
        let b = encode_to_vec(&clear).unwrap();
        let c = encode_to_vec(&plain).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_encode_gray_matches_rgb() {
        let values: Vec<u8> = (0..=255).collect();
        let gray = DecodedImage::new(256, 1, ColorLayout::Gray, values.clone());
        let rgb_pixels: Vec<u8> = values.iter().flat_map(|&v| [v, v, v]).collect();
        let as_rgb = rgb(256, 1, rgb_pixels);

        assert_eq!(encode_to_vec(&gray).unwrap(), encode_to_vec(&as_rgb).unwrap());
    }

    #[test]
    fn test_encode_gray_alpha_ignores_alpha() {
        let img = DecodedImage::new(2, 1, ColorLayout::GrayAlpha, vec![255, 0, 100, 255]);
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(out, vec![0x00, 0x02, 0x00, 0x01, 255, 100]);
    }

    #[test]
    fn test_encode_palette_rejected() {
        let img = DecodedImage::new(2, 1, ColorLayout::Palette, vec![0, 1]);
        let mut sink = Vec::new();
        let result = encode(&img, &mut sink);

        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedColorLayout(ColorLayout::Palette))
        ));
        assert!(sink.is_empty(), "Nothing should be written for a rejected layout");
    }

    #[test]
    fn test_encode_unsupported_rejected() {
        let img = DecodedImage::new(1, 1, ColorLayout::Unsupported, vec![]);
        let result = encode_to_vec(&img);
        assert!(matches!(
            result,
            Err(EncodeError::UnsupportedColorLayout(ColorLayout::Unsupported))
        ));
    }

    #[test]
    fn test_encode_dimensions_too_large() {
        let img = DecodedImage {
            width: 65536,
            height: 1,
            layout: ColorLayout::Gray,
            pixels: vec![0; 65536],
        };
        let mut sink = Vec::new();
        let result = encode(&img, &mut sink);
        assert!(matches!(
            result,
            Err(EncodeError::DimensionsTooLarge {
                width: 65536,
                height: 1
            })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_encode_max_width() {
        let img = DecodedImage::new(65535, 1, ColorLayout::Gray, vec![255; 65535]);
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(&out[..HEADER_LEN], &[0xFF, 0xFF, 0x00, 0x01]);
        assert_eq!(out.len(), HEADER_LEN + 65535);
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let img = DecodedImage {
            width: 2,
            height: 2,
            layout: ColorLayout::Rgb,
            pixels: vec![0; 11],
        };
        let result = encode_to_vec(&img);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_encode_zero_sized() {
        let img = DecodedImage::new(0, 3, ColorLayout::Rgb, vec![]);
        let out = encode_to_vec(&img).unwrap();
        assert_eq!(out, vec![0x00, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn test_encode_write_failure_in_header() {
        let img = rgb(1, 1, vec![1, 2, 3]);
        let mut sink = FailingSink {
            written: Vec::new(),
            limit: 2,
        };
        let result = encode(&img, &mut sink);
        assert!(matches!(result, Err(EncodeError::WriteFailed(_))));
        assert_eq!(sink.written, vec![0x00, 0x01]);
    }

    #[test]
    fn test_encode_write_failure_leaves_partial_output() {
        let img = DecodedImage::new(2, 3, ColorLayout::Gray, vec![100; 6]);
        let mut sink = FailingSink {
            written: Vec::new(),
            limit: HEADER_LEN + 3,
        };
        let result = encode(&img, &mut sink);
        assert!(matches!(result, Err(EncodeError::WriteFailed(_))));
        assert_eq!(sink.written.len(), HEADER_LEN + 3);
    }

    #[test]
    fn test_encode_returns_header() {
        let img = DecodedImage::new(3, 2, ColorLayout::Gray, vec![0; 6]);
        let mut sink = Vec::new();
        let header = encode(&img, &mut sink).unwrap();
        assert_eq!(header, Gs8Header { width: 3, height: 2 });
        assert_eq!(sink.len(), header.file_len());
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::UnsupportedColorLayout(ColorLayout::Palette);
        assert_eq!(err.to_string(), "Unsupported color layout: PALETTE");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
