//! Error types for the cfgdrift CLI.
//!
//! Uses thiserror for derive macros. Every variant carries the path or host
//! that failed so the message printed by `main` is actionable on its own.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cfgdrift operations.
#[derive(Error, Debug)]
pub enum CfgDriftError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// A local file could not be read.
    #[error("could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A remote session could not be established.
    #[error("could not connect to host {host}: {message}")]
    Connection { host: String, message: String },

    /// The session was established but the remote file could not be fetched.
    #[error("could not fetch {host}:{path}: {message}")]
    Fetch {
        host: String,
        path: String,
        message: String,
    },

    /// The file content is not well-formed for its format.
    #[error("could not parse {path} at line {line}, column {column}: {message}")]
    Parse {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// Drift was found and the caller asked for it to be treated as a failure.
    #[error("Drift detected: {0}")]
    DriftDetected(String),
}

impl CfgDriftError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CfgDriftError::UserError(_) => exit_codes::USER_ERROR,
            CfgDriftError::Io { .. } => exit_codes::USER_ERROR,
            CfgDriftError::Parse { .. } => exit_codes::PARSE_FAILURE,
            CfgDriftError::Connection { .. } => exit_codes::REMOTE_FAILURE,
            CfgDriftError::Fetch { .. } => exit_codes::REMOTE_FAILURE,
            CfgDriftError::DriftDetected(_) => exit_codes::DRIFT_DETECTED,
        }
    }
}

/// Result type alias for cfgdrift operations.
pub type Result<T> = std::result::Result<T, CfgDriftError>;
