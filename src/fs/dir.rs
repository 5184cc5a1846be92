//! Package directory moves.
//!
//! Moves are applied immediately; there is no rollback once the import walk
//! has started writing files.

use crate::error::{RenameError, Result};
use std::fs;
use std::path::Path;

/// Ensures `to` is free to receive the moved package.
///
/// With `force`, an existing target is removed (only reported in dry run).
pub fn clear_target(to: &Path, force: bool, dry_run: bool) -> Result<()> {
    if !to.exists() {
        return Ok(());
    }

    if !force {
        return Err(RenameError::TargetExists(to.to_path_buf()));
    }

    if dry_run {
        log::info!("Would remove existing target: {}", to.display());
        return Ok(());
    }

    println!(
        "Target directory {} exists, removing it (--force enabled)...",
        to.display()
    );

    let result = if to.is_dir() {
        fs::remove_dir_all(to)
    } else {
        fs::remove_file(to)
    };
    result.map_err(|e| RenameError::io_context("remove target directory", to, e))
}

/// Moves `from` to `to`, creating the parent of `to` first.
///
/// The move itself is a single `rename` on the host filesystem.
pub fn move_directory(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(RenameError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Source directory does not exist: {}", from.display()),
        )));
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RenameError::io_context("create parent directories for", to, e)
        })?;
    }

    fs::rename(from, to).map_err(|e| {
        RenameError::Io(std::io::Error::new(
            e.kind(),
            format!(
                "Failed to move {} → {}: {}",
                from.display(),
                to.display(),
                e
            ),
        ))
    })?;

    log::info!("Moved: {} → {}", from.display(), to.display());
    Ok(())
}
