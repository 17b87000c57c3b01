//! Analyzer engine.
//!
//! Every operation builds a fresh [`Analyzer`] from its [`ScanConfig`]:
//! load both files, parse them with the chosen [`Format`], then scan for
//! missing keys and, only if none are missing, compare values. Nothing is
//! shared between runs.

mod report;


pub use crate::source::ScanConfig;
pub use report::{Report, Status};

use crate::config::OutputFormat;
use crate::error::Result;
use crate::format::{Env, Format, Json};
use crate::source::{self, RawPair};
use crate::transport::Transport;
use std::io::Write;
use tracing::{debug, info};

/// Result of the two-step pipeline. Missing keys take priority: when any are
/// found, values are not compared at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<C> {
    /// Key paths present in master but absent from working.
    MissingKeys(Vec<String>),
    /// Every master key resolved; this is the value comparison.
    Compared(C),
}

/// Parsed working and master files for one run.
pub struct Analyzer<F: Format> {
    working: F::Parsed,
    master: F::Parsed,
}

impl<F: Format> Analyzer<F> {
    /// Load and parse both files described by `config`.
    pub fn new(config: &ScanConfig, transport: &dyn Transport) -> Result<Self> {
        let raw = source::load(config, transport)?;
        Self::from_raw(&raw)
    }

    /// Parse an already loaded pair.
    pub fn from_raw(raw: &RawPair) -> Result<Self> {
        let working = F::parse(&raw.working)?;
        let master = F::parse(&raw.master)?;
        debug!(
            format = F::NAME,
            working = %raw.working.origin,
            master = %raw.master.origin,
            "parsed file pair"
        );
        Ok(Self { working, master })
    }

    /// Key paths present in master that do not resolve in working.
    pub fn scan(&self) -> Vec<String> {
        let missing = F::missing_keys(&self.working, &self.master);
        info!(format = F::NAME, missing = missing.len(), "scan finished");
        missing
    }

    /// Value comparison. Callers must only rely on it when `scan` is empty.
    pub fn compare(&self) -> F::Comparison {
        F::compare(&self.working, &self.master)
    }

    /// Scan, then compare only if nothing is missing.
    pub fn run(&self) -> Outcome<F::Comparison> {
        let missing = self.scan();
        if missing.is_empty() {
            Outcome::Compared(self.compare())
        } else {
            Outcome::MissingKeys(missing)
        }
    }
}

/// Keys present in the master JSON document but missing from the working one.
pub fn scan_json(config: &ScanConfig, transport: &dyn Transport) -> Result<Vec<String>> {
    Ok(Analyzer::<Json>::new(config, transport)?.scan())
}

/// Keys present in the master env file but missing from the working one.
pub fn scan_env(config: &ScanConfig, transport: &dyn Transport) -> Result<Vec<String>> {
    Ok(Analyzer::<Env>::new(config, transport)?.scan())
}

/// Run the JSON pipeline and write the report to `out`.
///
/// Missing keys are reported on their own; otherwise a generic "files
/// differ" notice is written when the documents are not deeply equal.
pub fn print_json(
    config: &ScanConfig,
    transport: &dyn Transport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<Report> {
    let outcome = Analyzer::<Json>::new(config, transport)?.run();
    let report = Report::from_json_outcome(config, outcome);
    report.write_to(format, out)?;
    Ok(report)
}

/// Run the env pipeline and write the report to `out`.
///
/// Missing keys are reported on their own; otherwise the keys whose values
/// differ are listed.
pub fn print_env(
    config: &ScanConfig,
    transport: &dyn Transport,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<Report> {
    let outcome = Analyzer::<Env>::new(config, transport)?.run();
    let report = Report::from_env_outcome(config, outcome);
    report.write_to(format, out)?;
    Ok(report)
}
