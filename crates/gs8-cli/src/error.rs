//! Errors reported by the converter binary.

use std::io;
use std::path::PathBuf;

use gs8_core::{ContainerError, ConvertError, Gs8Header};
use thiserror::Error;

/// Every variant ends the process with exit status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Opening input image {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("Opening output image {}: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("Writing to output file {}: {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Verifying {}: {source}", path.display())]
    Verify { path: PathBuf, source: ContainerError },

    #[error("Verifying {}: header {found:?} does not match {expected:?}", path.display())]
    VerifyMismatch {
        path: PathBuf,
        expected: Gs8Header,
        found: Gs8Header,
    },
}
