//! End-of-run summary printed to stdout.

use crate::fs::walk::WalkReport;
use colored::Colorize;
use std::path::{Path, PathBuf};

const LISTED_FILES: usize = 8;

/// What a run changed, for display.
#[derive(Debug)]
pub struct Summary<'a> {
    pub root: &'a Path,
    pub dry_run: bool,
    pub moved: Option<(PathBuf, PathBuf)>,
    pub manifest: Option<PathBuf>,
    pub walk: &'a WalkReport,
}

impl Summary<'_> {
    /// Project-relative, forward-slash form of `path`.
    fn display_path(&self, path: &Path) -> String {
        let relative = pathdiff::diff_paths(path, self.root).unwrap_or_else(|| path.to_path_buf());
        relative.to_string_lossy().replace('\\', "/")
    }

    fn bullet(&self) -> String {
        if self.dry_run {
            "•".to_string()
        } else {
            "✓".green().to_string()
        }
    }

    pub fn print(&self) {
        if self.dry_run {
            println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
        } else {
            println!("\n{}", "Changes applied:".green().bold());
        }

        if let Some((from, to)) = &self.moved {
            println!("\n{} Directory", "📁".bold());
            println!(
                "   {} → {}",
                self.display_path(from).yellow(),
                self.display_path(to).green()
            );
        }

        if let Some(manifest) = &self.manifest {
            println!("\n{} Module manifest", "📦".bold());
            println!("   {} {}", self.bullet(), self.display_path(manifest).dimmed());
        }

        let modified = &self.walk.modified;
        if !modified.is_empty() {
            println!(
                "\n{} Source code ({} file{})",
                "📝".bold(),
                modified.len(),
                if modified.len() == 1 { "" } else { "s" }
            );
            for path in modified.iter().take(LISTED_FILES) {
                println!("   {} {}", self.bullet(), self.display_path(path).dimmed());
            }
            if modified.len() > LISTED_FILES {
                println!(
                    "   {} {} more...",
                    self.bullet(),
                    modified.len() - LISTED_FILES
                );
            }
        }

        if self.walk.format_warnings > 0 {
            println!(
                "\n{} {} file{} written without formatting",
                "⚠".yellow().bold(),
                self.walk.format_warnings,
                if self.walk.format_warnings == 1 { "" } else { "s" }
            );
        }

        println!();
        let verb = if self.dry_run { "would modify" } else { "modified" };
        println!(
            "Processed {} files, {} {} files.",
            self.walk.files_seen.to_string().cyan().bold(),
            verb,
            self.walk.files_modified().to_string().cyan().bold()
        );
        if self.dry_run {
            println!("Run without {} to apply.", "--dry-run".cyan());
        }
    }
}
