use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Files of this many bytes or more are never searched.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Directory names whose subtrees are never searched.
pub const DEFAULT_EXCLUDED_DIRECTORIES: [&str; 4] = ["node_modules", ".git", "dist", ".vscode"];

/// Errors raised while loading a [`SearchConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid search config: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Traversal limits for workspace searches. Missing JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Exact, case-sensitive directory names to skip wherever they appear.
    pub excluded_directories: Vec<String>,
    /// Exclusive upper bound on file size in bytes.
    pub max_file_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            excluded_directories: DEFAULT_EXCLUDED_DIRECTORIES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl SearchConfig {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn is_excluded(&self, directory_name: &str) -> bool {
        self.excluded_directories
            .iter()
            .any(|name| name == directory_name)
    }

    pub fn accepts_size(&self, size: u64) -> bool {
        size < self.max_file_size
    }
}
