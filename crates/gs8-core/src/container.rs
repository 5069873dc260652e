//! The GS8 raw grayscale container.
//!
//! ```text
//! offset 0: u16 big-endian  width
//! offset 2: u16 big-endian  height
//! offset 4: u8[width*height] row-major luminance, 0 = black, 255 = white
//! ```
//!
//! There is no magic number, version or checksum. A file is always exactly
//! `4 + width * height` bytes long, which display loaders rely on.

use std::io::{self, Read};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size of the dimension header in bytes.
pub const HEADER_LEN: usize = 4;

/// Errors that can occur while building or reading a GS8 container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// A dimension does not fit the 16-bit header fields.
    #[error("Dimensions {width}x{height} exceed the 65535 pixel limit")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// The stream ended before the header or payload was complete.
    #[error("Truncated GS8 data: expected {expected} bytes, got {actual}")]
    Truncated { expected: u64, actual: u64 },

    /// Bytes follow the payload.
    #[error("Unexpected data after GS8 payload")]
    TrailingData,

    /// Reading from the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The 4-byte dimension header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gs8Header {
    pub width: u16,
    pub height: u16,
}

impl Gs8Header {
    /// Build a header from decoder dimensions, checking they fit in 16 bits.
    pub fn new(width: u32, height: u32) -> Result<Self, ContainerError> {
        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(ContainerError::DimensionsTooLarge { width, height }),
        }
    }

    /// Serialize as big-endian width followed by big-endian height.
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let [w_hi, w_lo] = self.width.to_be_bytes();
        let [h_hi, h_lo] = self.height.to_be_bytes();
        [w_hi, w_lo, h_hi, h_lo]
    }

    /// Parse the first four bytes of a GS8 stream.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        match bytes {
            [w_hi, w_lo, h_hi, h_lo, ..] => Ok(Self {
                width: u16::from_be_bytes([*w_hi, *w_lo]),
                height: u16::from_be_bytes([*h_hi, *h_lo]),
            }),
            _ => Err(ContainerError::Truncated {
                expected: HEADER_LEN as u64,
                actual: bytes.len() as u64,
            }),
        }
    }

    /// Number of luminance bytes following the header.
    pub fn payload_len(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total container size in bytes.
    pub fn file_len(self) -> usize {
        HEADER_LEN + self.payload_len()
    }
}

/// A GS8 image read back from bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gs8Image {
    pub header: Gs8Header,
    /// Row-major luminance samples, `header.payload_len()` bytes.
    pub pixels: Vec<u8>,
}

impl Gs8Image {
    /// Luminance of pixel `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.header.width || y >= self.header.height {
            return None;
        }
        let idx = y as usize * self.header.width as usize + x as usize;
        self.pixels.get(idx).copied()
    }

    /// Brightest sample in the image, `None` when it has no pixels.
    pub fn max_luminance(&self) -> Option<u8> {
        self.pixels.iter().copied().max()
    }
}

/// Read a complete GS8 container, rejecting short or over-long input.
pub fn read_gs8<R: Read>(mut reader: R) -> Result<Gs8Image, ContainerError> {
    let mut head = Vec::with_capacity(HEADER_LEN);
    reader
        .by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut head)?;
    let header = Gs8Header::from_bytes(&head)?;

    let payload_len = header.payload_len();
    let mut pixels = Vec::with_capacity(payload_len);
    reader
        .by_ref()
        .take(payload_len as u64)
        .read_to_end(&mut pixels)?;
    if pixels.len() < payload_len {
        return Err(ContainerError::Truncated {
            expected: header.file_len() as u64,
            actual: (HEADER_LEN + pixels.len()) as u64,
        });
    }

    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(ContainerError::TrailingData);
    }

    Ok(Gs8Image { header, pixels })
}

/// Parse a GS8 container held in memory.
pub fn parse_gs8(bytes: &[u8]) -> Result<Gs8Image, ContainerError> {
    read_gs8(bytes)
}
