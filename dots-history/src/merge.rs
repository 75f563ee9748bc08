use crate::{HistoryError, HistoryMap, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

impl HistoryMap {
    /// Merge `remote` into `local`.
    ///
    /// Commands only known remotely are appended in remote order. For a
    /// command present on both sides the remote entry wins only with a
    /// strictly newer timestamp.
    pub fn merge(local: HistoryMap, remote: HistoryMap) -> HistoryMap {
        let mut merged = local;
        let mut taken = 0usize;
        for entry in remote {
            if merged.insert_latest(entry) {
                taken += 1;
            }
        }
        debug!(
            "merged history: {} entries ({} taken from remote)",
            merged.len(),
            taken
        );
        merged
    }

    /// Write the map to `path` in fish history format, oldest first.
    ///
    /// A failed write may leave a truncated file behind.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let to_write_error = |source| HistoryError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(to_write_error)?;
        let mut writer = BufWriter::new(file);
        for entry in self.sorted() {
            write!(writer, "{entry}").map_err(to_write_error)?;
        }
        writer.flush().map_err(to_write_error)?;

        debug!("wrote {} history entries to {}", self.len(), path.display());
        Ok(())
    }
}

/// Merge the local and remote history files into `output`.
///
/// Unreadable inputs are treated as empty. Returns `false` when the output
/// could not be written. Both failures are reported on stderr.
pub fn merge_histories(local: &Path, remote: &Path, output: &Path) -> bool {
    let local_entries = HistoryMap::load_or_empty(local);
    let remote_entries = HistoryMap::load_or_empty(remote);
    let merged = HistoryMap::merge(local_entries, remote_entries);

    match merged.write_to(output) {
        Ok(()) => {
            info!(
                "merged {} commands into {}",
                merged.len(),
                output.display()
            );
            true
        }
        Err(err) => {
            eprintln!("Error writing merged history: {err}");
            false
        }
    }
}
