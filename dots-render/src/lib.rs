//! Tool config rendering
//!
//! Configs for `codex` (TOML) and `opencode` (JSONC) carry `__isWork__`
//! marker comments on sections and keys that only belong on a work machine.
//! Rendering drops the marked content when `is_work` is false and always
//! drops the markers themselves.

use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

mod ascii_json;
pub mod codex;
pub mod jsonc;
pub mod opencode;

/// Sentinel token of a marker comment
pub const WORK_MARKER: &str = "__isWork__";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown tool: {0:?}")]
    UnknownTool(String),

    #[error("invalid boolean: {0:?}")]
    InvalidBool(String),

    #[error("invalid JSON after removing comments: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is not a JSON object")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Codex,
    Opencode,
}

impl FromStr for Tool {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "codex" => Ok(Tool::Codex),
            "opencode" => Ok(Tool::Opencode),
            _ => Err(RenderError::UnknownTool(s.to_string())),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Codex => write!(f, "codex"),
            Tool::Opencode => write!(f, "opencode"),
        }
    }
}

/// Parse a loose boolean such as `yes`, `N` or `1`.
pub fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(RenderError::InvalidBool(s.to_string())),
    }
}

/// Render config `text` for `tool`
pub fn render(tool: Tool, is_work: bool, text: &str) -> Result<String> {
    debug!("rendering {tool} config (is_work={is_work}, {} bytes)", text.len());
    match tool {
        Tool::Codex => Ok(codex::render(text, is_work)),
        Tool::Opencode => opencode::render(text, is_work),
    }
}

/// Read the config at `path` and render it for `tool`
pub fn render_path(tool: Tool, is_work: bool, path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    render(tool, is_work, &text)
}

/// Lowercase hex SHA-256 digest of `text`
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
