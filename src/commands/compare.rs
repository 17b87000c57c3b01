//! Shared handler for the `json` and `env` commands.

use crate::analyzer::{self, Report, ScanConfig};
use crate::cli::{CompareArgs, FormatArg};
use crate::config::{Config, OutputFormat};
use crate::error::{CfgDriftError, Result};
use crate::format::{Env, Format, Json};
use crate::transport::Transport;
use std::io::Write;
use tracing::info;

/// Binds a [`Format`] to its scan and print operations.
pub trait FileKind: Format {
    fn scan(config: &ScanConfig, transport: &dyn Transport) -> Result<Vec<String>>;

    fn print(
        config: &ScanConfig,
        transport: &dyn Transport,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<Report>;
}

impl FileKind for Json {
    fn scan(config: &ScanConfig, transport: &dyn Transport) -> Result<Vec<String>> {
        analyzer::scan_json(config, transport)
    }

    fn print(
        config: &ScanConfig,
        transport: &dyn Transport,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<Report> {
        analyzer::print_json(config, transport, format, out)
    }
}

impl FileKind for Env {
    fn scan(config: &ScanConfig, transport: &dyn Transport) -> Result<Vec<String>> {
        analyzer::scan_env(config, transport)
    }

    fn print(
        config: &ScanConfig,
        transport: &dyn Transport,
        format: OutputFormat,
        out: &mut dyn Write,
    ) -> Result<Report> {
        analyzer::print_env(config, transport, format, out)
    }
}

/// Run one comparison and write its report to `out`.
///
/// With `--missing-only` only the scan runs. With `--fail-on-drift`, any
/// finding is returned as `CfgDriftError::DriftDetected` after the report
/// has been written.
pub fn run_compare<K: FileKind>(
    args: &CompareArgs,
    config: &Config,
    transport: &dyn Transport,
    out: &mut dyn Write,
) -> Result<()> {
    let scan_config = match &args.host {
        Some(host) => ScanConfig::remote(&args.working, &args.master, host),
        None => ScanConfig::local(&args.working, &args.master),
    };
    let format = match args.format {
        Some(FormatArg::Text) => OutputFormat::Text,
        Some(FormatArg::Json) => OutputFormat::Json,
        None => config.output.format,
    };

    info!(
        format = K::NAME,
        working = %scan_config.working_name(),
        master = %scan_config.master_name(),
        "comparing files"
    );

    let report = if args.missing_only {
        let missing = K::scan(&scan_config, transport)?;
        let report = Report::from_scan(K::NAME, &scan_config, missing);
        report.write_to(format, out)?;
        report
    } else {
        K::print(&scan_config, transport, format, out)?
    };

    if args.fail_on_drift && report.has_drift() {
        return Err(CfgDriftError::DriftDetected(report.summary()));
    }

    Ok(())
}
