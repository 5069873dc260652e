//! PNG decoding with source color type detection.
//!
//! Pixel data is decoded by the `image` crate. The IHDR chunk is read here as
//! well, because the library expands indexed images to RGB(A) and would
//! otherwise hide that the source was palette based.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use super::{ColorLayout, DecodeError, DecodedImage, PalettePolicy};

/// The 8-byte signature every PNG stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Signature, IHDR length and type, then 13 bytes of IHDR data.
const IHDR_END: usize = 8 + 4 + 4 + 13;

/// Color type codes from the IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PngColorType {
    Gray = 0,
    Rgb = 2,
    Indexed = 3,
    GrayAlpha = 4,
    Rgba = 6,
}

impl PngColorType {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PngColorType::Gray),
            2 => Some(PngColorType::Rgb),
            3 => Some(PngColorType::Indexed),
            4 => Some(PngColorType::GrayAlpha),
            6 => Some(PngColorType::Rgba),
            _ => None,
        }
    }
}

/// Fields of the IHDR chunk relevant to conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: PngColorType,
}

/// Check whether `bytes` begins with the PNG signature.
pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Read the IHDR chunk, which must directly follow the signature.
///
/// # Errors
///
/// Returns `DecodeError::InvalidSignature` if the signature is missing and
/// `DecodeError::CorruptedFile` if the IHDR chunk is truncated or malformed.
pub fn read_png_header(bytes: &[u8]) -> Result<PngHeader, DecodeError> {
    if !has_png_signature(bytes) {
        return Err(DecodeError::InvalidSignature);
    }
    if bytes.len() < IHDR_END {
        return Err(DecodeError::CorruptedFile("truncated IHDR chunk".to_string()));
    }

    let be_u32 = |at: usize| {
        u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    };

    let chunk_len = be_u32(8);
    if chunk_len != 13 || &bytes[12..16] != b"IHDR" {
        return Err(DecodeError::CorruptedFile(
            "first chunk is not a valid IHDR".to_string(),
        ));
    }

    let bit_depth = bytes[24];
    let color_type = PngColorType::from_code(bytes[25]).ok_or_else(|| {
        DecodeError::CorruptedFile(format!("unknown color type {}", bytes[25]))
    })?;

    Ok(PngHeader {
        width: be_u32(16),
        height: be_u32(20),
        bit_depth,
        color_type,
    })
}

/// Decode a PNG image from bytes into 8-bit interleaved samples.
///
/// Sub-byte grayscale and palette images are expanded by the decoder, and a
/// tRNS chunk turns into an alpha channel.
///
/// # Arguments
///
/// * `bytes` - Raw PNG file bytes
/// * `palette` - Whether indexed images are reported as `Palette` or as
///   their expanded RGB/RGBA samples
///
/// # Errors
///
/// Returns `DecodeError::InvalidSignature` if the bytes are not a PNG.
/// Returns `DecodeError::UnsupportedBitDepth` for 16-bit images.
/// Returns `DecodeError::CorruptedFile` if the PNG cannot be decoded.
pub fn decode_png(bytes: &[u8], palette: PalettePolicy) -> Result<DecodedImage, DecodeError> {
    let header = read_png_header(bytes)?;
    log::debug!(
        "IHDR {}x{} depth={} color={:?}",
        header.width,
        header.height,
        header.bit_depth,
        header.color_type
    );

    if header.bit_depth > 8 {
        return Err(DecodeError::UnsupportedBitDepth(header.bit_depth));
    }

    let img = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    let (mut layout, pixels) = classify(img)?;

    if header.color_type == PngColorType::Indexed && palette == PalettePolicy::Reject {
        layout = ColorLayout::Palette;
    }

    Ok(DecodedImage::new(width, height, layout, pixels))
}

/// Split a decoded image into its layout tag and raw sample buffer.
fn classify(img: DynamicImage) -> Result<(ColorLayout, Vec<u8>), DecodeError> {
    match img {
        DynamicImage::ImageRgb8(buf) => Ok((ColorLayout::Rgb, buf.into_raw())),
        DynamicImage::ImageRgba8(buf) => Ok((ColorLayout::Rgba, buf.into_raw())),
        DynamicImage::ImageLuma8(buf) => Ok((ColorLayout::Gray, buf.into_raw())),
        DynamicImage::ImageLumaA8(buf) => Ok((ColorLayout::GrayAlpha, buf.into_raw())),
        other => {
            let color = other.color();
            let bits = color.bits_per_pixel() / u16::from(color.channel_count().max(1));
            Err(DecodeError::UnsupportedBitDepth(bits as u8))
        }
    }
}
