//! Fish history merging
//!
//! Decodes fish `history` files into one entry per distinct command and
//! merges a local and a remote file by most-recent-timestamp-wins, writing
//! the union back in ascending timestamp order.

use std::path::PathBuf;
use thiserror::Error;

mod entry;
mod merge;
mod parser;

#[cfg(test)]
mod tests;

pub use entry::{HistoryEntry, HistoryMap};
pub use merge::merge_histories;
pub use parser::parse_history;

/// History specific error types
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid timestamp on line {line}: {value:?}")]
    InvalidTimestamp { line: usize, value: String },
}

pub type Result<T> = std::result::Result<T, HistoryError>;
