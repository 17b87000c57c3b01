//! ssh/scp transport.
//!
//! A session is opened by running `ssh <host> true`, which proves the host is
//! reachable and authentication works. Files are then copied with `scp` into
//! a scratch directory owned by the session and read back into memory.

use super::{Session, Transport};
use crate::config::SshConfig;
use crate::error::{CfgDriftError, Result};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use tracing::{debug, info};

/// Captured output of a finished ssh or scp process.
#[derive(Debug, Clone)]
struct CommandOutput {
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// The most useful line of diagnostics: stderr, then stdout, then the status.
    fn summary(&self, output: &Output) -> String {
        if !self.stderr.is_empty() {
            self.stderr.clone()
        } else if !self.stdout.is_empty() {
            self.stdout.clone()
        } else {
            format!("exit code {}", output.status.code().unwrap_or(-1))
        }
    }
}

/// Run a prepared command, returning a diagnostic message on failure.
fn run_command(cmd: &mut Command) -> std::result::Result<CommandOutput, String> {
    let program = cmd.get_program().to_string_lossy().to_string();

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| format!("failed to execute {}: {}", program, e))?;

    let captured = CommandOutput::from_output(&output);

    if output.status.success() {
        Ok(captured)
    } else {
        Err(captured.summary(&output))
    }
}

/// Append the connection options shared by ssh and scp.
///
/// scp spells the port flag `-P`; ssh uses `-p`.
fn apply_options(cmd: &mut Command, config: &SshConfig, scp_style: bool) -> Result<()> {
    if let Some(port) = config.port {
        cmd.arg(if scp_style { "-P" } else { "-p" })
            .arg(port.to_string());
    }
    if let Some(identity) = config
        .identity_file
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        cmd.arg("-i").arg(identity);
    }
    cmd.arg("-o")
        .arg(format!("ConnectTimeout={}", config.connect_timeout_secs));
    if config.batch_mode {
        cmd.arg("-o").arg("BatchMode=yes");
    }
    cmd.args(config.extra_args()?);
    Ok(())
}

/// Transport that reaches hosts through the local ssh client.
///
/// Host aliases are passed through untouched, so anything in
/// `~/.ssh/config` (users, ports, jump hosts) applies.
#[derive(Debug, Clone, Default)]
pub struct SshTransport {
    config: SshConfig,
}

impl SshTransport {
    pub fn new(config: SshConfig) -> Self {
        Self { config }
    }
}

impl Transport for SshTransport {
    fn open_session(&self, host: &str) -> Result<Box<dyn Session>> {
        let mut cmd = self.config.ssh_command()?;
        apply_options(&mut cmd, &self.config, false)?;
        cmd.arg(host).arg("true");

        debug!(host, program = %self.config.ssh_program, "opening ssh session");
        run_command(&mut cmd).map_err(|message| CfgDriftError::Connection {
            host: host.to_string(),
            message,
        })?;

        let scratch = TempDir::new().map_err(|e| CfgDriftError::Connection {
            host: host.to_string(),
            message: format!("failed to create scratch directory: {}", e),
        })?;

        info!(host, "ssh session established");
        Ok(Box::new(SshSession {
            host: host.to_string(),
            config: self.config.clone(),
            scratch,
            fetches: 0,
        }))
    }
}

/// A verified connection to one host.
///
/// Fetched files land in a private scratch directory that is removed when
/// the session is dropped.
#[derive(Debug)]
pub struct SshSession {
    host: String,
    config: SshConfig,
    scratch: TempDir,
    fetches: usize,
}

impl Session for SshSession {
    fn host(&self) -> &str {
        &self.host
    }

    fn fetch(&mut self, remote_path: &str) -> Result<Vec<u8>> {
        self.fetches += 1;
        let local = self.scratch.path().join(format!("fetch-{}", self.fetches));

        let mut cmd = self.config.scp_command()?;
        cmd.arg("-q");

        // Only the original scp protocol hands the path to a remote shell.
        let source = if self.config.legacy_scp {
            cmd.arg("-O");
            format!("{}:{}", self.host, shell_words::quote(remote_path))
        } else {
            format!("{}:{}", self.host, remote_path)
        };
        apply_options(&mut cmd, &self.config, true)?;
        cmd.arg(&source).arg(&local);

        debug!(host = %self.host, path = remote_path, "fetching remote file");
        run_command(&mut cmd).map_err(|message| self.fetch_error(remote_path, message))?;

        let bytes = std::fs::read(&local)
            .map_err(|e| self.fetch_error(remote_path, format!("copied file unreadable: {}", e)))?;

        debug!(host = %self.host, path = remote_path, bytes = bytes.len(), "fetched remote file");
        Ok(bytes)
    }
}

impl SshSession {
    fn fetch_error(&self, remote_path: &str, message: String) -> CfgDriftError {
        CfgDriftError::Fetch {
            host: self.host.clone(),
            path: remote_path.to_string(),
            message,
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        debug!(host = %self.host, fetches = self.fetches, "releasing ssh session");
    }
}
