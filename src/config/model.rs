//! Config struct definitions and default implementations.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for cfgdrift.
///
/// This struct represents the contents of `.cfgdrift.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the ssh/scp remote transport.
    pub ssh: SshConfig,

    /// Settings for report rendering.
    pub output: OutputConfig,
}

/// Settings used to open a remote session and fetch the master file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshConfig {
    /// Program used to check the host is reachable (default: "ssh").
    #[serde(default = "default_ssh_program")]
    pub ssh_program: String,

    /// Program used to copy the remote file (default: "scp").
    #[serde(default = "default_scp_program")]
    pub scp_program: String,

    /// Port passed as `-p` to ssh and `-P` to scp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Identity file passed as `-i`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,

    /// Seconds before a connection attempt is abandoned (`-o ConnectTimeout`).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u32,

    /// Never prompt for passwords or host key confirmation (`-o BatchMode=yes`).
    #[serde(default = "default_true")]
    pub batch_mode: bool,

    /// Extra arguments appended to both programs, split with shell-words.
    #[serde(default)]
    pub extra_args: String,

    /// Run scp in its original protocol (`-O`), where a remote shell expands
    /// the path. The path is then shell-quoted. Off by default: since OpenSSH
    /// 9.0 scp speaks SFTP and takes the path literally.
    #[serde(default)]
    pub legacy_scp: bool,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            ssh_program: default_ssh_program(),
            scp_program: default_scp_program(),
            port: None,
            identity_file: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            batch_mode: default_true(),
            extra_args: String::new(),
            legacy_scp: false,
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format when `--format` is not given.
    pub format: OutputFormat,
}
