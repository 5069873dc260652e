//! Command line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use gs8_core::{ConvertOptions, PalettePolicy};
use log::LevelFilter;

/// Convert a PNG into an 8-bit grayscale raw image for e-ink displays.
///
/// The output starts with width and height as big-endian 16-bit values,
/// followed by one luminance byte per pixel (0 = black, 255 = white).
#[derive(Debug, Parser)]
#[command(name = "png2gs8", version)]
pub struct Args {
    /// PNG image to convert
    pub input: PathBuf,

    /// Destination for the raw grayscale image
    pub output: PathBuf,

    /// Convert indexed-color PNGs through their palette instead of rejecting them
    #[arg(long)]
    pub expand_palette: bool,

    /// Read the written file back and check its header and size
    #[arg(long)]
    pub verify: bool,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Conversion options selected on the command line.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            palette: if self.expand_palette {
                PalettePolicy::Expand
            } else {
                PalettePolicy::Reject
            },
        }
    }

    /// Log level before any `RUST_LOG` override.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
