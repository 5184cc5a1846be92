//! Error types for renamepkg.
//!
//! All operations return `Result<T>` which aliases `Result<T, RenameError>`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from rename operations.
#[derive(Debug, Error)]
pub enum RenameError {
    /// Missing or conflicting command-line inputs.
    #[error("{0}")]
    Usage(String),

    /// Target directory already exists and `--force` was not given.
    #[error("Target directory {} already exists. Use --force to overwrite it.", .0.display())]
    TargetExists(PathBuf),

    /// Invalid directory path.
    #[error("Invalid path '{0}': {1}")]
    InvalidPath(String, String),

    /// Invalid module path.
    #[error("Invalid module path '{0}': {1}")]
    InvalidModule(String, String),

    /// `go.mod` has no `module` declaration.
    ///
    /// The manifest is left untouched.
    #[error("module declaration not found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// File system operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Directory traversal failed.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Regex compilation failed (indicates bug).
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl RenameError {
    /// Wraps an I/O error with the path and action that produced it.
    pub fn io_context(action: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        RenameError::Io(std::io::Error::new(
            err.kind(),
            format!("Failed to {} {}: {}", action, path.display(), err),
        ))
    }
}

/// Result type alias for renamepkg operations.
pub type Result<T> = std::result::Result<T, RenameError>;
