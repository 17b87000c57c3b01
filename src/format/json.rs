//! JSON parsing, missing-key scan, and deep equality.
//!
//! The master document is the structural template. The scan walks it depth
//! first and looks up each object key (or array index) at the same position
//! in the working document. The first path that does not resolve is reported
//! and its subtree is not visited. Keys that exist only in the working
//! document are never reported.
//!
//! Paths join object keys with `.` and render array indices as `[i]`:
//! `servers[0].host`.

use crate::error::{CfgDriftError, Result};
use serde_json::{Number, Value};
use std::fmt::Write as _;

/// A parsed JSON document. Objects keep their document key order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTree {
    root: Value,
}

impl From<Value> for KeyTree {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

/// Parse JSON bytes. `origin` names the file in the error.
pub fn parse_json(bytes: &[u8], origin: &str) -> Result<KeyTree> {
    let root = serde_json::from_slice(bytes).map_err(|e| {
        // serde_json appends the position to its message; it is carried separately.
        let suffix = format!(" at line {} column {}", e.line(), e.column());
        let message = e.to_string();
        let message = message.strip_suffix(&suffix).unwrap_or(&message).to_string();
        CfgDriftError::Parse {
            path: origin.to_string(),
            line: e.line(),
            column: e.column(),
            message,
        }
    })?;
    Ok(KeyTree { root })
}

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

fn render(path: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in path {
        match segment {
            Segment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            Segment::Index(index) => {
                let _ = write!(out, "[{}]", index);
            }
        }
    }
    out
}

/// Topmost key paths of `master` that do not resolve in `working`.
pub fn missing_keys(working: &KeyTree, master: &KeyTree) -> Vec<String> {
    let mut missing = Vec::new();
    let mut path = Vec::new();
    walk(&master.root, &working.root, &mut path, &mut missing);
    missing
}

fn walk<'a>(
    master: &'a Value,
    working: &Value,
    path: &mut Vec<Segment<'a>>,
    missing: &mut Vec<String>,
) {
    match master {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(Segment::Key(key));
                visit(child, working.get(key.as_str()), path, missing);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                visit(child, working.get(index), path, missing);
                path.pop();
            }
        }
        // Presence of a scalar is all the scan checks.
        _ => {}
    }
}

fn visit<'a>(
    master: &'a Value,
    working: Option<&Value>,
    path: &mut Vec<Segment<'a>>,
    missing: &mut Vec<String>,
) {
    match working {
        Some(working) => walk(master, working, path, missing),
        None => missing.push(render(path)),
    }
}

/// Deep structural equality.
///
/// Objects compare by key set and values regardless of key order, arrays by
/// position, numbers by numeric value (`1` equals `1.0`), other scalars by
/// kind and value.
pub fn equal(working: &KeyTree, master: &KeyTree) -> bool {
    values_equal(&working.root, &master.root)
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, x)| y.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    // Integers compare exactly; only mixed or float pairs go through f64.
    if !x.is_f64() && !y.is_f64() {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
