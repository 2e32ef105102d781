//! Binary entrypoint for the `swag` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    // Recording is handled in commands::dispatch via SWAG_RECORD=<file>.
    match swag::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
