//! Rendering of analyzer results.

use super::{Outcome, ScanConfig};
use crate::config::OutputFormat;
use crate::error::{CfgDriftError, Result};
use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Overall verdict for a file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Keys from master are absent in working.
    MissingKeys,
    /// All keys present, but values differ.
    Different,
    /// Nothing to report.
    Equal,
}

/// What one run found, ready to print as text or JSON.
///
/// The JSON form carries only `working`, `master`, `status`, `missing` and
/// `different`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub format: &'static str,
    pub working: String,
    pub master: String,
    pub status: Status,
    /// False for a scan-only run, where values were never compared.
    #[serde(skip)]
    pub values_checked: bool,
    pub missing: Vec<String>,
    pub different: Vec<String>,
}

impl Report {
    fn new(format: &'static str, config: &ScanConfig, status: Status) -> Self {
        Self {
            format,
            working: config.working_name(),
            master: config.master_name(),
            status,
            values_checked: true,
            missing: Vec::new(),
            different: Vec::new(),
        }
    }

    /// Report for a scan-only run.
    pub fn from_scan(format: &'static str, config: &ScanConfig, missing: Vec<String>) -> Self {
        let status = if missing.is_empty() {
            Status::Equal
        } else {
            Status::MissingKeys
        };
        Self {
            values_checked: false,
            missing,
            ..Self::new(format, config, status)
        }
    }

    pub fn from_json_outcome(config: &ScanConfig, outcome: Outcome<bool>) -> Self {
        match outcome {
            Outcome::MissingKeys(missing) => Self {
                missing,
                ..Self::new("json", config, Status::MissingKeys)
            },
            Outcome::Compared(true) => Self::new("json", config, Status::Equal),
            Outcome::Compared(false) => Self::new("json", config, Status::Different),
        }
    }

    pub fn from_env_outcome(config: &ScanConfig, outcome: Outcome<Vec<String>>) -> Self {
        match outcome {
            Outcome::MissingKeys(missing) => Self {
                missing,
                ..Self::new("env", config, Status::MissingKeys)
            },
            Outcome::Compared(different) if different.is_empty() => {
                Self::new("env", config, Status::Equal)
            }
            Outcome::Compared(different) => Self {
                different,
                ..Self::new("env", config, Status::Different)
            },
        }
    }

    /// True when anything was found.
    pub fn has_drift(&self) -> bool {
        self.status != Status::Equal
    }

    /// One-line summary used when drift is escalated to an error.
    pub fn summary(&self) -> String {
        match self.status {
            Status::MissingKeys => format!(
                "{} missing key(s) in {}",
                self.missing.len(),
                self.working
            ),
            Status::Different => format!("{} differs from {}", self.working, self.master),
            Status::Equal => format!("{} matches {}", self.working, self.master),
        }
    }

    /// Human-readable lines.
    pub fn to_text(&self) -> String {
        match self.status {
            Status::MissingKeys => format!(
                "(!) found missing keys in {} (master: {}): {}\n",
                self.working,
                self.master,
                self.missing.join(", ")
            ),
            Status::Different => {
                let mut text = format!(
                    "(!) {} and {} are different. Ignore if this is intentional\n",
                    self.working, self.master
                );
                for key in &self.different {
                    text.push_str(&format!("    - {}\n", key));
                }
                text
            }
            Status::Equal if self.values_checked => {
                format!("{} matches {}\n", self.working, self.master)
            }
            Status::Equal => format!(
                "no missing keys in {} (master: {})\n",
                self.working, self.master
            ),
        }
    }

    /// Write the report in the requested format.
    pub fn write_to(&self, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
        debug!(kind = self.format, status = ?self.status, ?format, "writing report");
        let rendered = match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(self).map_err(|e| {
                    CfgDriftError::UserError(format!("failed to serialize report: {}", e))
                })?;
                json.push('\n');
                json
            }
        };

        out.write_all(rendered.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| CfgDriftError::UserError(format!("failed to write report: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScanConfig {
        ScanConfig::remote(".env", "/srv/app/.env", "prod")
    }

    #[test]
    fn missing_keys_text_names_both_files() {
        let report = Report::from_env_outcome(
            &config(),
            Outcome::MissingKeys(vec!["BAR".to_string(), "BAZ".to_string()]),
        );
        assert_eq!(report.status, Status::MissingKeys);
        assert_eq!(
            report.to_text(),
            "(!) found missing keys in .env (master: prod:/srv/app/.env): BAR, BAZ\n"
        );
    }

    #[test]
    fn env_differences_listed_one_per_line() {
        let report =
            Report::from_env_outcome(&config(), Outcome::Compared(vec!["BAR".to_string()]));
        assert_eq!(report.status, Status::Different);
        assert_eq!(
            report.to_text(),
            concat!(
                "(!) .env and prod:/srv/app/.env are different. ",
                "Ignore if this is intentional\n",
                "    - BAR\n"
            )
        );
    }

    #[test]
    fn json_difference_has_no_key_list() {
        let config = ScanConfig::local("app.json", "app.example.json");
        let report = Report::from_json_outcome(&config, Outcome::Compared(false));
        assert_eq!(report.status, Status::Different);
        assert!(report.different.is_empty());
        assert!(report.has_drift());
    }

    #[test]
    fn clean_reports() {
        let config = ScanConfig::local("app.json", "app.example.json");
        let full = Report::from_json_outcome(&config, Outcome::Compared(true));
        assert!(!full.has_drift());
        assert_eq!(full.to_text(), "app.json matches app.example.json\n");

        let scan_only = Report::from_scan("json", &config, Vec::new());
        assert!(!scan_only.has_drift());
        assert_eq!(
            scan_only.to_text(),
            "no missing keys in app.json (master: app.example.json)\n"
        );
    }

    #[test]
    fn json_output_shape() {
        let report = Report::from_env_outcome(
            &config(),
            Outcome::MissingKeys(vec!["BAR".to_string()]),
        );
        let mut out = Vec::new();
        report.write_to(OutputFormat::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "working": ".env",
                "master": "prod:/srv/app/.env",
                "status": "missing_keys",
                "missing": ["BAR"],
                "different": []
            })
        );
    }

    #[test]
    fn matching_json_files_serialize_as_equal() {
        let config = ScanConfig::local("app.json", "app.example.json");
        let report = Report::from_json_outcome(&config, Outcome::Compared(true));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "equal");

        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            vec!["working", "master", "status", "missing", "different"]
        );
    }

    #[test]
    fn clean_scan_serializes_as_equal() {
        let report = Report::from_scan("env", &config(), Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "equal");
        assert_eq!(value["missing"], serde_json::json!([]));
    }

    #[test]
    fn summary_counts_missing_keys() {
        let report = Report::from_scan("env", &config(), vec!["A".to_string()]);
        assert_eq!(report.summary(), "1 missing key(s) in .env");
    }
}
