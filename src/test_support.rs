use crate::config::SshConfig;
use crate::error::{CfgDriftError, Result};
use crate::transport::{Session, Transport};
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

pub(crate) fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Stand-in ssh/scp programs backed by shell scripts in a temp dir.
///
/// The scripts are run through `sh` so they never need the executable bit.
/// Each invocation records its arguments to `<dir>/<program>.args`.
pub(crate) struct FakeSsh {
    dir: TempDir,
}

impl FakeSsh {
    pub(crate) fn reachable() -> Self {
        Self::with_ssh_body("exit 0")
    }

    pub(crate) fn unreachable(stderr: &str) -> Self {
        Self::with_ssh_body(&format!("echo '{}' >&2\nexit 255", stderr))
    }

    fn with_ssh_body(ssh_body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let record = |name: &str| {
            let args_file = dir.path().join(format!("{name}.args"));
            format!("echo \"$*\" > '{}'", args_file.display())
        };

        let ssh = format!("{}\n{}\n", record("ssh"), ssh_body);
        // scp: copy the path after `host:` in the second-to-last arg to the last arg.
        let scp = format!(
            "{}\nfor a in \"$@\"; do src=\"$dst\"; dst=\"$a\"; done\ncp \"${{src#*:}}\" \"$dst\"\n",
            record("scp")
        );

        write_file(dir.path(), "fake-ssh", &ssh);
        write_file(dir.path(), "fake-scp", &scp);
        Self { dir }
    }

    pub(crate) fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn config(&self) -> SshConfig {
        SshConfig {
            ssh_program: format!("sh {}", self.dir.path().join("fake-ssh").display()),
            scp_program: format!("sh {}", self.dir.path().join("fake-scp").display()),
            ..SshConfig::default()
        }
    }

    pub(crate) fn recorded(&self, program: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(format!("{program}.args"))).unwrap()
    }
}

/// In-memory transport: a map of remote paths to contents, plus counters
/// for sessions opened and still alive.
#[derive(Default)]
pub(crate) struct MemoryTransport {
    files: HashMap<String, Vec<u8>>,
    unreachable: bool,
    opened: Rc<Cell<usize>>,
    live: Rc<Cell<usize>>,
}

impl MemoryTransport {
    pub(crate) fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.as_bytes().to_vec());
        self
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.get()
    }

    pub(crate) fn live(&self) -> usize {
        self.live.get()
    }
}

impl Transport for MemoryTransport {
    fn open_session(&self, host: &str) -> Result<Box<dyn Session>> {
        if self.unreachable {
            return Err(CfgDriftError::Connection {
                host: host.to_string(),
                message: "connection refused".to_string(),
            });
        }
        self.opened.set(self.opened.get() + 1);
        self.live.set(self.live.get() + 1);
        Ok(Box::new(MemorySession {
            host: host.to_string(),
            files: self.files.clone(),
            live: Rc::clone(&self.live),
        }))
    }
}

struct MemorySession {
    host: String,
    files: HashMap<String, Vec<u8>>,
    live: Rc<Cell<usize>>,
}

impl Session for MemorySession {
    fn host(&self) -> &str {
        &self.host
    }

    fn fetch(&mut self, remote_path: &str) -> Result<Vec<u8>> {
        self.files
            .get(remote_path)
            .cloned()
            .ok_or_else(|| CfgDriftError::Fetch {
                host: self.host.clone(),
                path: remote_path.to_string(),
                message: "No such file or directory".to_string(),
            })
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}
