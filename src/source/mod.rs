//! Source loading for the working and master files.
//!
//! The working file is always read from local disk. The master file comes
//! from a [`ByteSource`] chosen once, up front: [`LocalFile`] when no host
//! alias is configured, [`RemoteFile`] wrapping an open transport session
//! otherwise. Opening the session happens before any file is read, so an
//! unreachable host fails the run without touching the filesystem.


use crate::error::{CfgDriftError, Result};
use crate::transport::{Session, Transport};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The file pair to compare and where the master lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Local, active configuration file being validated.
    pub working_path: PathBuf,
    /// Reference file; a remote path when `host_alias` is set.
    pub master_path: String,
    /// ssh host alias holding the master file.
    pub host_alias: Option<String>,
}

impl ScanConfig {
    pub fn local(working_path: impl Into<PathBuf>, master_path: impl Into<String>) -> Self {
        Self {
            working_path: working_path.into(),
            master_path: master_path.into(),
            host_alias: None,
        }
    }

    pub fn remote(
        working_path: impl Into<PathBuf>,
        master_path: impl Into<String>,
        host_alias: impl Into<String>,
    ) -> Self {
        Self {
            working_path: working_path.into(),
            master_path: master_path.into(),
            host_alias: Some(host_alias.into()),
        }
    }

    /// The host alias, if one is set and not blank.
    pub fn host(&self) -> Option<&str> {
        self.host_alias
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Display name of the working file.
    pub fn working_name(&self) -> String {
        self.working_path.display().to_string()
    }

    /// Display name of the master file (`host:path` when remote).
    pub fn master_name(&self) -> String {
        match self.host() {
            Some(host) => format!("{}:{}", host, self.master_path),
            None => self.master_path.clone(),
        }
    }
}

/// Unparsed content of one file, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// Both buffers for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    pub working: RawConfig,
    pub master: RawConfig,
}

/// Something that can produce the bytes behind a path.
pub trait ByteSource {
    /// Human-readable location of `path` in this source.
    fn describe(&self, path: &str) -> String;

    /// Read the full content at `path`.
    fn read(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFile;

impl ByteSource for LocalFile {
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }

    fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        read_local(Path::new(path))
    }
}

fn read_local(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|source| CfgDriftError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read local file");
    Ok(bytes)
}

/// Reads through an open remote session. The session is released when
/// this source is dropped.
pub struct RemoteFile {
    session: Box<dyn Session>,
}

impl RemoteFile {
    pub fn new(session: Box<dyn Session>) -> Self {
        Self { session }
    }
}

impl ByteSource for RemoteFile {
    fn describe(&self, path: &str) -> String {
        format!("{}:{}", self.session.host(), path)
    }

    fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        self.session.fetch(path)
    }
}

/// Pick the source for the master file.
///
/// With a host alias this opens the remote session immediately; a failure
/// here is always fatal.
pub fn master_source(
    config: &ScanConfig,
    transport: &dyn Transport,
) -> Result<Box<dyn ByteSource>> {
    match config.host() {
        Some(host) => {
            let session = transport.open_session(host)?;
            Ok(Box::new(RemoteFile::new(session)))
        }
        None => Ok(Box::new(LocalFile)),
    }
}

/// Read the working file locally and the master file from its source.
pub fn load(config: &ScanConfig, transport: &dyn Transport) -> Result<RawPair> {
    let mut source = master_source(config, transport)?;

    let working = RawConfig {
        origin: config.working_name(),
        bytes: read_local(&config.working_path)?,
    };

    let master = RawConfig {
        origin: source.describe(&config.master_path),
        bytes: source.read(&config.master_path)?,
    };

    Ok(RawPair { working, master })
}
