//! JSON filter for opencode `opencode.jsonc`.
//!
//! Marker comments do not survive JSON decoding, so restricted keys are
//! collected from the raw text first and removed from the decoded `mcp`
//! object afterwards.

use crate::{RenderError, Result, WORK_MARKER, ascii_json, jsonc};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

/// Top-level object holding MCP server definitions
pub const MCP_KEY: &str = "mcp";

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*//\s*{WORK_MARKER}\s*$")).expect("marker pattern is valid")
});

static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"([^"]+)"\s*:"#).expect("key pattern is valid"));

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("//")
}

/// Collect the names of keys declared right after a `// __isWork__` line.
///
/// Blank and `//` comment lines between the marker and the key are skipped.
pub fn restricted_keys(text: &str) -> BTreeSet<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut keys = BTreeSet::new();

    for (idx, line) in lines.iter().enumerate() {
        if !MARKER_REGEX.is_match(line) {
            continue;
        }
        let declaration = lines[idx + 1..]
            .iter()
            .find(|next| !is_skippable(next))
            .and_then(|next| KEY_REGEX.captures(next));
        if let Some(caps) = declaration {
            debug!("line {}: {:?} is work-only", idx + 1, &caps[1]);
            keys.insert(caps[1].to_string());
        }
    }
    keys
}

/// Empty or zero values, which stand in for "no servers configured".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Render opencode config text as 2-space indented, ASCII-only JSON.
pub fn render(text: &str, is_work: bool) -> Result<String> {
    let restricted = restricted_keys(text);
    let mut document: Value = serde_json::from_str(&jsonc::to_json(text))?;

    let root = document
        .as_object_mut()
        .ok_or(RenderError::NotAnObject("top-level document"))?;
    let mcp = root
        .entry(MCP_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if mcp.is_null() || (!is_work && is_falsy(mcp)) {
        *mcp = Value::Object(Map::new());
    }

    if !is_work {
        let servers = mcp
            .as_object_mut()
            .ok_or(RenderError::NotAnObject(MCP_KEY))?;
        servers.retain(|key, _| {
            let keep = !restricted.contains(key);
            if !keep {
                debug!("dropping work-only mcp server {key:?}");
            }
            keep
        });
    }

    let mut out = ascii_json::to_string_pretty(&document)?;
    out.push('\n');
    Ok(out)
}
