//! Configuration model for cfgdrift.
//!
//! This module defines the Config struct that represents `.cfgdrift.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{Config, SshConfig};
pub use operations::DEFAULT_CONFIG_FILE;
pub use types::OutputFormat;
