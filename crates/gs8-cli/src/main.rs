//! png2gs8 - PNG to 8-bit grayscale raw converter
//!
//! ```text
//! png2gs8 image.png image.gs8
//! ```
//!
//! The whole conversion happens in memory and the output file is only created
//! once it succeeded, so a rejected input never truncates an existing file.

mod args;
mod error;

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::process::ExitCode;

use clap::Parser;
use gs8_core::{convert_png, read_gs8, ConversionSummary};
use log::LevelFilter;

use args::Args;
use error::CliError;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap exits with 2 on usage errors; every failure here is 1.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(args.log_level());

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<ConversionSummary, CliError> {
    let png = fs::read(&args.input).map_err(|source| CliError::ReadInput {
        path: args.input.clone(),
        source,
    })?;
    log::debug!("read {} bytes from {}", png.len(), args.input.display());

    let mut gs8 = Vec::new();
    let summary = convert_png(&png, &mut gs8, &args.convert_options())?;
    drop(png);

    let mut file = File::create(&args.output).map_err(|source| CliError::CreateOutput {
        path: args.output.clone(),
        source,
    })?;
    file.write_all(&gs8)
        .and_then(|()| file.flush())
        .map_err(|source| CliError::WriteOutput {
            path: args.output.clone(),
            source,
        })?;
    log::debug!("wrote {} bytes to {}", gs8.len(), args.output.display());

    if args.verify {
        verify(args, summary)?;
    }

    Ok(summary)
}

/// Read the output back and compare it with what was just written.
fn verify(args: &Args, summary: ConversionSummary) -> Result<(), CliError> {
    let file = File::open(&args.output).map_err(|source| CliError::ReadInput {
        path: args.output.clone(),
        source,
    })?;
    let image = read_gs8(BufReader::new(file)).map_err(|source| CliError::Verify {
        path: args.output.clone(),
        source,
    })?;

    if image.header != summary.header {
        return Err(CliError::VerifyMismatch {
            path: args.output.clone(),
            expected: summary.header,
            found: image.header,
        });
    }

    log::info!(
        "verified {} bytes, max luminance {}",
        image.header.file_len(),
        image.max_luminance().unwrap_or(0)
    );
    Ok(())
}
