//! Command implementations for cfgdrift.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Both commands share one handler parameterised by the
//! file format.

mod compare;


use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{CfgDriftError, Result};
use crate::format::{Env, Json};
use crate::transport::SshTransport;

pub use compare::run_compare;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Settings are
/// resolved once here, then handed to the command.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        CfgDriftError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    let transport = SshTransport::new(config.ssh.clone());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Json(args) => run_compare::<Json>(&args, &config, &transport, &mut stdout),
        Command::Env(args) => run_compare::<Env>(&args, &config, &transport, &mut stdout),
    }
}
