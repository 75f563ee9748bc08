use crate::entry::{CMD_PREFIX, PATH_ITEM_PREFIX, PATHS_PREFIX, WHEN_PREFIX};
use crate::{HistoryEntry, HistoryError, HistoryMap, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse the content of a fish history file.
///
/// Scanning is driven by line prefixes only. A `- cmd: ` line opens an entry,
/// `  when: ` and `  paths:` lines fill it in, and anything else is ignored.
/// Duplicate commands keep the entry with the strictly greatest timestamp.
pub fn parse_history(content: &str) -> Result<HistoryMap> {
    let mut map = HistoryMap::new();
    let mut current: Option<HistoryEntry> = None;
    let mut dropped = 0usize;
    let mut lines = content.lines().enumerate().peekable();

    while let Some((idx, line)) = lines.next() {
        if let Some(command) = line.strip_prefix(CMD_PREFIX) {
            if let Some(entry) = current.replace(HistoryEntry::new(command))
                && !map.insert_latest(entry)
            {
                dropped += 1;
            }
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(value) = line.strip_prefix(WHEN_PREFIX) {
            entry.when = Some(parse_timestamp(idx + 1, value)?);
        } else if line.starts_with(PATHS_PREFIX) {
            entry.paths.clear();
            while let Some(path) = lines
                .peek()
                .map(|&(_, next)| next)
                .and_then(|next| next.strip_prefix(PATH_ITEM_PREFIX))
            {
                entry.paths.push(path.to_string());
                lines.next();
            }
        }
    }

    if let Some(entry) = current
        && !map.insert_latest(entry)
    {
        dropped += 1;
    }

    debug!(
        "parsed {} history entries ({} older duplicates dropped)",
        map.len(),
        dropped
    );
    Ok(map)
}

/// Parse a `when` value. Single underscores between digits are accepted
/// (`1_700_000_000`); values outside the `i64` range are rejected.
fn parse_timestamp(line: usize, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let well_formed = !digits.starts_with('_') && !digits.ends_with('_') && !digits.contains("__");

    well_formed
        .then(|| trimmed.replace('_', "").parse::<i64>().ok())
        .flatten()
        .ok_or_else(|| HistoryError::InvalidTimestamp {
            line,
            value: value.to_string(),
        })
}

impl HistoryMap {
    /// Read and parse a history file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading history from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| HistoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_history(&content)
    }

    /// Read and parse a history file, reporting any failure on stderr and
    /// falling back to an empty map.
    ///
    /// The report does not depend on the log filter. Callers cannot tell a
    /// missing or malformed file from an empty one; use [`HistoryMap::load`]
    /// when that matters.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(map) => map,
            Err(err) => {
                eprintln!("Error parsing {}: {err}", path.display());
                debug!("falling back to empty history for {}", path.display());
                HistoryMap::new()
            }
        }
    }
}
