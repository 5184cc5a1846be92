//! Source tree traversal and per-file rewrite.
//!
//! Every `.go` file below the root is visited in a deterministic order.
//! Dependency caches and version control metadata are skipped. `.gitignore`
//! is deliberately not consulted: an ignored file that imports the moved
//! package still has to compile.

use crate::error::{RenameError, Result};
use crate::format::{FormatError, SourceFormatter};

use colored::Colorize;
use ignore::{DirEntry, WalkBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of source files that are rewritten.
pub const SOURCE_EXTENSION: &str = "go";

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &["vendor", "node_modules", ".git", ".hg", ".svn"];

/// Outcome of a walk.
#[derive(Debug, Default, Clone)]
pub struct WalkReport {
    pub files_seen: usize,
    pub modified: Vec<PathBuf>,
    pub format_warnings: usize,
}

impl WalkReport {
    pub fn files_modified(&self) -> usize {
        self.modified.len()
    }
}

/// Walks a source tree and writes rewritten files back in place.
pub struct TreeWalker<'a> {
    root: PathBuf,
    formatter: &'a dyn SourceFormatter,
    dry_run: bool,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, formatter: &'a dyn SourceFormatter, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            formatter,
            dry_run,
        }
    }

    /// Applies `rewrite` to every source file.
    ///
    /// `rewrite` returns `Some(text)` for files that change. Changed files are
    /// formatted and written with their original permissions; unchanged files
    /// are left alone. The first I/O error aborts the walk, files written
    /// before it keep their new content.
    pub fn walk_and_rewrite<F>(&self, mut rewrite: F) -> Result<WalkReport>
    where
        F: FnMut(&Path, &str) -> Option<String>,
    {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|e| !is_excluded(e))
            .build();

        let mut report = WalkReport::default();
        let mut formatter_missing = false;

        for entry in walker {
            let entry = entry?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }

            report.files_seen += 1;

            let original =
                fs::read_to_string(path).map_err(|e| RenameError::io_context("read", path, e))?;

            let rewritten = match rewrite(path, &original) {
                Some(text) if text != original => text,
                _ => continue,
            };

            let output = match self.formatter.format(&rewritten) {
                Ok(formatted) => formatted,
                Err(FormatError::Rejected(msg)) => {
                    eprintln!(
                        "{} cannot format {}: {}",
                        "Warning:".yellow().bold(),
                        path.display(),
                        msg
                    );
                    report.format_warnings += 1;
                    rewritten
                }
                Err(e @ FormatError::Unavailable(_)) => {
                    if !formatter_missing {
                        log::warn!("{}; writing files unformatted", e);
                        formatter_missing = true;
                    }
                    report.format_warnings += 1;
                    rewritten
                }
            };

            if self.dry_run {
                log::info!("Would update: {}", path.display());
            } else {
                write_preserving_permissions(path, &output)?;
                log::debug!("Updated: {}", path.display());
            }

            report.modified.push(path.to_path_buf());
        }

        Ok(report)
    }
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn write_preserving_permissions(path: &Path, content: &str) -> Result<()> {
    let permissions = fs::metadata(path)
        .map_err(|e| RenameError::io_context("stat", path, e))?
        .permissions();

    fs::write(path, content).map_err(|e| RenameError::io_context("write", path, e))?;
    fs::set_permissions(path, permissions)
        .map_err(|e| RenameError::io_context("set permissions on", path, e))
}
