//! cfgdrift: compare a working config file against its master copy.
//!
//! This is the main entry point for the `cfgdrift` CLI. It sets up logging,
//! parses arguments, dispatches to the command handler, and maps errors to
//! exit codes.

mod analyzer;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod format;
mod logging;
mod source;
mod transport;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_tracing(cli.verbose);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
