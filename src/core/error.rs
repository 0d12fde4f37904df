//! Error types for SmartWalk

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for walking and ignore resolution
#[derive(Error, Debug)]
pub enum WalkError {
    /// Traversal errors
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pattern-related errors
    #[error("Invalid pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Path {path} is outside of {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Invalid rule at {file}:{line}: {source}")]
    InvalidRule {
        file: PathBuf,
        line: usize,
        #[source]
        source: Box<WalkError>,
    },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Merge helper errors
    #[error("Unknown policy '{name}'")]
    UnknownPolicy { name: String },

    #[error("Content kinds do not match for policy {policy}")]
    MergeTypeMismatch { policy: String },

    #[error("Numeric overflow while appending key '{key}'")]
    MergeOverflow { key: String },
}

impl WalkError {
    /// Create a new not-a-directory error
    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// A checked path that does not resolve below the root
    pub fn outside_root(path: &Path, root: &Path) -> Self {
        Self::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for SmartWalk operations
pub type Result<T> = std::result::Result<T, WalkError>;
