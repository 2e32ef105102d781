//! Snapshot, diff and impact analysis for Swagger-style API descriptions.
//!
//! The core ([`model`], [`snapshot`], [`diff`], [`impact`]) is synchronous and
//! performs no I/O. Fetching, lock persistence and the CLI sit behind the
//! [`ports`] traits.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod impact;
pub mod logging;
pub mod model;
pub mod ports;
pub mod render;
pub mod snapshot;
pub mod source;
pub mod store;

use clap::error::ErrorKind;
use clap::Parser;

pub use error::{ImpactError, SwagError};

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}
