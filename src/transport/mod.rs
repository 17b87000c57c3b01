//! Remote transport abstraction.
//!
//! The analyzer only needs two capabilities from a remote host: open a
//! session, then fetch the bytes of a path through it. [`SshTransport`] is
//! the production implementation; tests substitute in-memory fakes.

mod ssh;

pub use ssh::SshTransport;

use crate::error::Result;

/// Opens sessions to remote hosts.
pub trait Transport {
    /// Establish a session with `host`.
    ///
    /// Fails with `CfgDriftError::Connection` when the host cannot be reached.
    fn open_session(&self, host: &str) -> Result<Box<dyn Session>>;
}

/// An open connection to a single host.
///
/// Resources held by the session are released when it is dropped.
pub trait Session {
    /// The host alias this session is connected to.
    fn host(&self) -> &str;

    /// Fetch the raw bytes of `remote_path`.
    ///
    /// Fails with `CfgDriftError::Fetch` when the file cannot be copied.
    fn fetch(&mut self, remote_path: &str) -> Result<Vec<u8>>;
}
