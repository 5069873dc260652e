//! One-call PNG to GS8 conversion.

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::Gs8Header;
use crate::decode::{decode_png, ColorLayout, DecodeError, PalettePolicy};
use crate::encode::{encode, EncodeError};

/// Errors from either half of the conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Options controlling how a PNG is converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Handling of indexed-color input
    pub palette: PalettePolicy,
}

impl ConvertOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a successful conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub header: Gs8Header,
    /// Layout of the decoded samples that were converted
    pub layout: ColorLayout,
}

/// Decode `png` and write its GS8 encoding to `sink`.
///
/// The decoded image is dropped as soon as encoding finishes.
pub fn convert_png<W: Write>(
    png: &[u8],
    sink: &mut W,
    options: &ConvertOptions,
) -> Result<ConversionSummary, ConvertError> {
    let image = decode_png(png, options.palette)?;
    log::info!("{}x{} image, color:{}", image.width, image.height, image.layout);

    let header = encode(&image, sink)?;
    log::debug!("wrote {} bytes", header.file_len());

    Ok(ConversionSummary {
        header,
        layout: image.layout,
    })
}
