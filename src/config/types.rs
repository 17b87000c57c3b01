//! Configuration enums and default value functions.

use serde::{Deserialize, Serialize};

/// How reports are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable lines (default).
    #[default]
    Text,
    /// A single JSON object per run.
    Json,
}

pub fn default_ssh_program() -> String {
    "ssh".to_string()
}

pub fn default_scp_program() -> String {
    "scp".to_string()
}

pub fn default_connect_timeout_secs() -> u32 {
    10
}

pub fn default_true() -> bool {
    true
}
