//! CLI argument parsing for cfgdrift.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cfgdrift: find keys missing from a working config file and values that
/// drifted from its master copy.
///
/// The master file can be local (for example `.env.example`) or live on a
/// remote host reached over ssh (`--host <alias>`).
#[derive(Parser, Debug)]
#[command(name = "cfgdrift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Settings file (default: ./.cfgdrift.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for cfgdrift.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two JSON files.
    ///
    /// Reports keys missing from the working file; when none are missing,
    /// reports whether the documents differ.
    Json(CompareArgs),

    /// Compare two KEY=VALUE env files.
    ///
    /// Reports keys missing from the working file; when none are missing,
    /// lists the keys whose values differ.
    Env(CompareArgs),
}

/// Arguments shared by the `json` and `env` commands.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// The local, active config file being validated.
    pub working: PathBuf,

    /// The reference file. A path on the remote host when `--host` is given.
    pub master: String,

    /// ssh host alias to fetch the master file from.
    #[arg(long)]
    pub host: Option<String>,

    /// Only report missing keys; skip value comparison.
    #[arg(long)]
    pub missing_only: bool,

    /// Report format (default: from config, else text).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Exit with a non-zero code when drift is found.
    #[arg(long)]
    pub fail_on_drift: bool,
}

/// Report format accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_json_minimal() {
        let cli =
            Cli::try_parse_from(["cfgdrift", "json", "app.json", "app.example.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        if let Command::Json(args) = cli.command {
            assert_eq!(args.working, PathBuf::from("app.json"));
            assert_eq!(args.master, "app.example.json");
            assert!(args.host.is_none());
            assert!(!args.missing_only);
            assert!(args.format.is_none());
            assert!(!args.fail_on_drift);
        } else {
            panic!("Expected Json command");
        }
    }

    #[test]
    fn parse_env_full() {
        let cli = Cli::try_parse_from([
            "cfgdrift",
            "-vv",
            "env",
            ".env",
            "/srv/app/.env",
            "--host",
            "prod",
            "--missing-only",
            "--format",
            "json",
            "--fail-on-drift",
            "--config",
            "ops/cfgdrift.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("ops/cfgdrift.yaml")));
        if let Command::Env(args) = cli.command {
            assert_eq!(args.master, "/srv/app/.env");
            assert_eq!(args.host.as_deref(), Some("prod"));
            assert!(args.missing_only);
            assert_eq!(args.format, Some(FormatArg::Json));
            assert!(args.fail_on_drift);
        } else {
            panic!("Expected Env command");
        }
    }

    #[test]
    fn master_is_required() {
        assert!(Cli::try_parse_from(["cfgdrift", "env", ".env"]).is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        let result = Cli::try_parse_from(["cfgdrift", "json", "a", "b", "--format", "xml"]);
        assert!(result.is_err());
    }
}
