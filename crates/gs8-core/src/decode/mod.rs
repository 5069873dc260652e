//! PNG decoding for GS8 conversion.
//!
//! This module provides functionality for:
//! - Checking the PNG signature and reading the IHDR chunk
//! - Decoding PNG pixel data into 8-bit interleaved samples
//! - Classifying the samples into a [`ColorLayout`]
//!
//! Chunk parsing, decompression and bit-depth expansion are left to the
//! `image` crate. Everything is decoded into memory before conversion starts.
//!
//! # Examples
//!
//! ```ignore
//! use gs8_core::decode::{decode_png, PalettePolicy};
//!
//! let png_bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_png(&png_bytes, PalettePolicy::Reject).unwrap();
//! println!("Decoded {}x{} {} image", image.width, image.height, image.layout);
//! ```

mod png;
mod types;

pub use png::{decode_png, has_png_signature, read_png_header, PngColorType, PngHeader, PNG_SIGNATURE};
pub use types::{ColorLayout, DecodeError, DecodedImage, PalettePolicy};
