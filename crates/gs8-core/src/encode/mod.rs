//! GS8 encoding pipeline.
//!
//! This module provides functionality for:
//! - Reducing RGB, RGBA, GRAY and GRAY_ALPHA samples to one luminance byte
//! - Writing the 4-byte dimension header and row-major payload to any sink
//!
//! # Examples
//!
//! ```ignore
//! use gs8_core::decode::{ColorLayout, DecodedImage};
//! use gs8_core::encode::encode_to_vec;
//!
//! let image = DecodedImage::new(2, 1, ColorLayout::Rgb, vec![255, 0, 0, 0, 0, 0]);
//! let bytes = encode_to_vec(&image).unwrap();
//! assert_eq!(bytes, [0x00, 0x02, 0x00, 0x01, 0x4C, 0x00]);
//! ```

mod gs8;

pub use gs8::{encode, encode_to_vec, EncodeError};
