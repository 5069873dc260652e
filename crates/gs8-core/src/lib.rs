//! GS8 Core - PNG to 8-bit grayscale raw conversion
//!
//! This crate turns PNG images into the GS8 format consumed by small e-ink
//! display controllers: a 4-byte big-endian `width, height` header followed by
//! one luminance byte per pixel in row-major order.

pub mod container;
pub mod convert;
pub mod decode;
pub mod encode;
pub mod luminance;

pub use container::{parse_gs8, read_gs8, ContainerError, Gs8Header, Gs8Image, HEADER_LEN};
pub use convert::{convert_png, ConversionSummary, ConvertError, ConvertOptions};
pub use decode::{decode_png, ColorLayout, DecodeError, DecodedImage, PalettePolicy};
pub use encode::{encode, encode_to_vec, EncodeError};
