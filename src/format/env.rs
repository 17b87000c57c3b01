//! `KEY=VALUE` env file parsing and comparison.
//!
//! Parsing never fails. Blank lines, `#` comments, lines without `=`, and
//! lines whose key is empty are skipped. Each remaining line is split on the
//! first `=`; key and value are trimmed. A repeated key keeps the position of
//! its first occurrence and the value of its last.

use indexmap::IndexMap;

/// Flat mapping of env keys to values, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    entries: IndexMap<String, String>,
}

impl KeySet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse env file content into a [`KeySet`]. Invalid UTF-8 is replaced lossily.
pub fn parse_env(bytes: &[u8]) -> KeySet {
    let text = String::from_utf8_lossy(bytes);
    let mut entries = IndexMap::new();

    for line in text.lines() {
        if let Some((key, value)) = parse_line(line) {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    KeySet { entries }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

/// Keys of `master` absent from `working`, in master file order.
pub fn missing_keys(working: &KeySet, master: &KeySet) -> Vec<String> {
    master
        .iter()
        .filter(|(key, _)| !working.contains_key(key))
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Keys present in both sets whose values differ (exact string comparison),
/// in master file order.
pub fn diff(working: &KeySet, master: &KeySet) -> Vec<String> {
    master
        .iter()
        .filter(|(key, value)| working.get(key).is_some_and(|w| w != *value))
        .map(|(key, _)| key.to_string())
        .collect()
}
