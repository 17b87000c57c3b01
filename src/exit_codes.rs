//! Exit code constants for the cfgdrift CLI.
//!
//! - 0: Success (no drift, or drift reported without `--fail-on-drift`)
//! - 1: User error (bad args, invalid config, unreadable local file)
//! - 2: Parse failure (malformed JSON)
//! - 3: Remote failure (session could not be opened, remote file unreadable)
//! - 4: Drift detected (only with `--fail-on-drift`)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or a local file that cannot be read.
pub const USER_ERROR: i32 = 1;

/// A config file could not be parsed.
pub const PARSE_FAILURE: i32 = 2;

/// Remote host unreachable or remote file unreadable.
pub const REMOTE_FAILURE: i32 = 3;

/// Missing keys or value differences were found and `--fail-on-drift` was set.
pub const DRIFT_DETECTED: i32 = 4;
