//! Orchestration of the two rename modes.

pub mod move_package;
pub mod rename_module;

use crate::format::SourceFormatter;
use colored::Colorize;
use std::path::PathBuf;

/// Settings shared by both modes.
pub struct RunContext {
    pub root: PathBuf,
    pub dry_run: bool,
    formatter: Box<dyn SourceFormatter>,
}

impl RunContext {
    pub fn new(root: PathBuf, dry_run: bool, formatter: Box<dyn SourceFormatter>) -> Self {
        Self {
            root,
            dry_run,
            formatter,
        }
    }

    pub fn formatter(&self) -> &dyn SourceFormatter {
        self.formatter.as_ref()
    }
}

/// Reports a fatal error hit after files may already have been rewritten.
fn report_partial_failure(e: &crate::error::RenameError) {
    eprintln!("{} {}", "Error during rewrite:".red().bold(), e);
    eprintln!("Files processed before the error keep their changes.");
    eprintln!("Hint: Check your version control system.");
}
