//! Section filter for codex `config.toml`.
//!
//! The file is split into sections at table headers. A section containing a
//! `# __isWork__` line is work-only.

use crate::WORK_MARKER;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*#\s*{WORK_MARKER}\s*$")).expect("marker pattern is valid")
});

fn is_table_header(line: &str) -> bool {
    let stripped = line.trim();
    !stripped.is_empty()
        && stripped.starts_with('[')
        && stripped.ends_with(']')
        && !stripped.starts_with('#')
}

fn is_marker(line: &str) -> bool {
    MARKER_REGEX.is_match(line)
}

/// Split `text` into sections, each line keeping its terminator.
///
/// Text before the first header forms its own leading section.
fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.split_inclusive('\n') {
        if is_table_header(line) {
            sections.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    sections.push(current);
    sections
}

/// Render codex config text.
pub fn render(text: &str, is_work: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for section in split_sections(text) {
        let Some(first) = section.first() else {
            continue;
        };
        let work_only = section.iter().any(|line| is_marker(line));
        if work_only && !is_work {
            debug!("dropping work-only section {:?}", first.trim());
            continue;
        }
        for line in section.into_iter().filter(|line| !is_marker(line)) {
            out.push_str(line);
        }
    }
    out
}
