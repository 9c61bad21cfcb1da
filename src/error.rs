//! Error types for Chronos
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Chronos operations
pub type ChronosResult<T> = Result<T, ChronosError>;

/// Main error type for Chronos operations
#[derive(Error, Debug)]
pub enum ChronosError {
    /// A path was reported both as a file and as the ancestor of another path
    #[error("path '{path}' is reported both as a file and as a directory")]
    PathConflict { path: String },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Directory to scan does not exist
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON change list
    #[error("invalid change list: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory walk failure
    #[error("directory walk failed: {0}")]
    Walk(#[from] ignore::Error),
}
