//! Pre-flight checks performed before any file is touched.
//!
//! Unlike `rules`, these functions inspect the file system.

use crate::error::{RenameError, Result};
use crate::gomod::{self, GO_MOD};
use crate::verify::rules::{validate_module_path, validate_relative_dir};
use std::path::{Path, PathBuf};

/// Resolved directories of a package move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub old_dir: PathBuf,
    pub new_dir: PathBuf,
}

/// Validates a package move before execution.
///
/// # Checks Performed
///
/// 1. Both directories are valid relative paths
/// 2. The source directory exists
/// 3. Neither directory contains the other
/// 4. The target does not exist, unless `force` is set
///
/// # Errors
///
/// Returns the first failed check. Nothing is modified.
pub fn check_package_move(root: &Path, from: &str, to: &str, force: bool) -> Result<MovePlan> {
    validate_relative_dir(from)?;
    validate_relative_dir(to)?;

    let old_dir = root.join(from);
    let new_dir = root.join(to);

    if !old_dir.is_dir() {
        return Err(RenameError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Source directory does not exist: {}", old_dir.display()),
        )));
    }

    if new_dir.starts_with(&old_dir) {
        return Err(RenameError::InvalidPath(
            to.to_string(),
            format!("cannot move '{}' into itself", from),
        ));
    }

    // Clearing a containing target under --force would delete the source.
    if old_dir.starts_with(&new_dir) {
        return Err(RenameError::InvalidPath(
            to.to_string(),
            format!("cannot replace a directory containing '{}'", from),
        ));
    }

    if new_dir.exists() && !force {
        return Err(RenameError::TargetExists(new_dir));
    }

    if let Some(parent) = new_dir.parent() {
        if !parent.exists() {
            log::info!("Parent directory '{}' will be created", parent.display());
        }
    }

    Ok(MovePlan { old_dir, new_dir })
}

/// Returns the module root: the explicit override, or the one in `go.mod`.
pub fn resolve_module_root(root: &Path, explicit: Option<&str>) -> Result<String> {
    let module = match explicit {
        Some(module) => module.trim_end_matches('/').to_string(),
        None => gomod::read_module_root(&root.join(GO_MOD))?,
    };

    validate_module_path(&module)?;
    Ok(module)
}
