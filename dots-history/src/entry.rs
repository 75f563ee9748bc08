use indexmap::IndexMap;
use std::fmt;

pub(crate) const CMD_PREFIX: &str = "- cmd: ";
pub(crate) const WHEN_PREFIX: &str = "  when: ";
pub(crate) const PATHS_PREFIX: &str = "  paths:";
pub(crate) const PATH_ITEM_PREFIX: &str = "    - ";

/// A single recorded shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The literal command line, unique within a `HistoryMap`
    pub command: String,
    /// Epoch seconds of the last run, if recorded
    pub when: Option<i64>,
    /// Paths referenced by the command, in file order
    pub paths: Vec<String>,
}

impl HistoryEntry {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            when: None,
            paths: Vec::new(),
        }
    }

    pub fn with_when(mut self, when: i64) -> Self {
        self.when = Some(when);
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Timestamp used for ordering; a missing `when` counts as 0.
    pub fn timestamp(&self) -> i64 {
        self.when.unwrap_or(0)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{CMD_PREFIX}{}", self.command)?;
        if let Some(when) = self.when {
            writeln!(f, "{WHEN_PREFIX}{when}")?;
        }
        if !self.paths.is_empty() {
            writeln!(f, "{PATHS_PREFIX}")?;
            for path in &self.paths {
                writeln!(f, "{PATH_ITEM_PREFIX}{path}")?;
            }
        }
        Ok(())
    }
}

/// Entries keyed by command, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryMap {
    entries: IndexMap<String, HistoryEntry>,
}

impl HistoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, command: &str) -> Option<&HistoryEntry> {
        self.entries.get(command)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.values()
    }

    /// Store `entry` unless an entry for the same command with an equal or
    /// newer timestamp is already present.
    ///
    /// A replaced entry keeps the position of the one it replaces. Returns
    /// whether `entry` was stored.
    pub fn insert_latest(&mut self, entry: HistoryEntry) -> bool {
        match self.entries.get_mut(&entry.command) {
            Some(existing) if entry.timestamp() > existing.timestamp() => {
                *existing = entry;
                true
            }
            Some(_) => false,
            None => {
                self.entries.insert(entry.command.clone(), entry);
                true
            }
        }
    }

    /// Entries sorted by ascending timestamp.
    ///
    /// The sort is stable, so entries sharing a timestamp stay in insertion
    /// order.
    pub fn sorted(&self) -> Vec<&HistoryEntry> {
        let mut sorted: Vec<&HistoryEntry> = self.entries.values().collect();
        sorted.sort_by_key(|entry| entry.timestamp());
        sorted
    }

    /// Serialize in fish history format, oldest first
    pub fn to_history_string(&self) -> String {
        self.sorted().iter().map(ToString::to_string).collect()
    }
}

impl IntoIterator for HistoryMap {
    type Item = HistoryEntry;
    type IntoIter = indexmap::map::IntoValues<String, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<HistoryEntry> for HistoryMap {
    fn from_iter<T: IntoIterator<Item = HistoryEntry>>(iter: T) -> Self {
        let mut map = HistoryMap::new();
        for entry in iter {
            map.insert_latest(entry);
        }
        map
    }
}
