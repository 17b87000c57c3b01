//! Format extractors.
//!
//! Each supported file format turns raw bytes into a key-oriented structure
//! and knows how to find missing keys and compare values for that structure.
//! [`Format`] ties those pieces together so the analyzer pipeline is written
//! once for both formats.

pub mod env;
pub mod json;

use crate::error::Result;
use crate::source::RawConfig;
use tracing::debug;

pub use env::KeySet;
pub use json::KeyTree;

/// A configuration file format understood by the analyzer.
pub trait Format {
    /// Parsed, comparable representation of one file.
    type Parsed;
    /// Result of value comparison once no keys are missing.
    type Comparison;

    /// Short lowercase name used in logs and reports.
    const NAME: &'static str;

    /// Parse raw bytes into the comparable representation.
    fn parse(raw: &RawConfig) -> Result<Self::Parsed>;

    /// Key paths present in `master` that do not resolve in `working`.
    fn missing_keys(working: &Self::Parsed, master: &Self::Parsed) -> Vec<String>;

    /// Value-level comparison. Only meaningful when no keys are missing.
    fn compare(working: &Self::Parsed, master: &Self::Parsed) -> Self::Comparison;
}

/// Flat `KEY=VALUE` files. Comparison yields the keys whose values differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Env;

impl Format for Env {
    type Parsed = KeySet;
    type Comparison = Vec<String>;

    const NAME: &'static str = "env";

    fn parse(raw: &RawConfig) -> Result<KeySet> {
        let set = env::parse_env(&raw.bytes);
        if set.is_empty() {
            debug!(origin = %raw.origin, "env file has no keys");
        } else {
            debug!(origin = %raw.origin, keys = set.len(), "parsed env file");
        }
        Ok(set)
    }

    fn missing_keys(working: &KeySet, master: &KeySet) -> Vec<String> {
        env::missing_keys(working, master)
    }

    fn compare(working: &KeySet, master: &KeySet) -> Vec<String> {
        env::diff(working, master)
    }
}

/// JSON documents of any shape. Comparison yields a deep-equality verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json;

impl Format for Json {
    type Parsed = KeyTree;
    type Comparison = bool;

    const NAME: &'static str = "json";

    fn parse(raw: &RawConfig) -> Result<KeyTree> {
        json::parse_json(&raw.bytes, &raw.origin)
    }

    fn missing_keys(working: &KeyTree, master: &KeyTree) -> Vec<String> {
        json::missing_keys(working, master)
    }

    fn compare(working: &KeyTree, master: &KeyTree) -> bool {
        json::equal(working, master)
    }
}
