//! Config loading, discovery, and validation.

use super::model::{Config, SshConfig};
use crate::error::{CfgDriftError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".cfgdrift.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(CfgDriftError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CfgDriftError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            CfgDriftError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the config for this run.
    ///
    /// An explicit path must exist. Without one, `.cfgdrift.yaml` in `dir` is
    /// used when present, otherwise defaults apply.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading discovered config");
            return Self::load(candidate);
        }

        Ok(Self::default())
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `ssh.ssh_program` and `ssh.scp_program` must be non-empty commands
    /// - `ssh.connect_timeout_secs` must be positive
    /// - `ssh.extra_args` must split cleanly with shell-words
    pub fn validate(&self) -> Result<()> {
        if self.ssh.connect_timeout_secs == 0 {
            return Err(CfgDriftError::UserError(
                "config validation failed: ssh.connect_timeout_secs must be greater than 0"
                    .to_string(),
            ));
        }

        self.ssh.ssh_command()?;
        self.ssh.scp_command()?;
        self.ssh.extra_args()?;
        Ok(())
    }
}

impl SshConfig {
    /// Build the ssh command prefix (program plus any leading arguments).
    pub fn ssh_command(&self) -> Result<Command> {
        command_prefix("ssh.ssh_program", &self.ssh_program)
    }

    /// Build the scp command prefix (program plus any leading arguments).
    pub fn scp_command(&self) -> Result<Command> {
        command_prefix("ssh.scp_program", &self.scp_program)
    }

    /// Split `extra_args` into an argv fragment.
    pub fn extra_args(&self) -> Result<Vec<String>> {
        shell_words::split(&self.extra_args).map_err(|e| {
            CfgDriftError::UserError(format!(
                "failed to parse ssh.extra_args '{}': {}\n\n\
                 Fix: check for unmatched quotes or invalid escape sequences in .cfgdrift.yaml.",
                self.extra_args, e
            ))
        })
    }
}

/// Parse a configured program string with shell-words into a `Command`.
///
/// The first word is the executable; remaining words become leading arguments.
fn command_prefix(field: &str, value: &str) -> Result<Command> {
    let words = shell_words::split(value).map_err(|e| {
        CfgDriftError::UserError(format!("failed to parse {} '{}': {}", field, value, e))
    })?;

    let Some((program, args)) = words.split_first() else {
        return Err(CfgDriftError::UserError(format!(
            "config validation failed: {} must not be empty",
            field
        )));
    };

    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}
