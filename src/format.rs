//! Source formatting after rewriting.
//!
//! Rewritten files are piped through `gofmt` so alias insertion and removal
//! leave canonical layout behind. A rejected or missing formatter never aborts
//! a run; the caller keeps the unformatted text.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Why a formatter could not produce output.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter ran and rejected the input.
    #[error("{0}")]
    Rejected(String),

    /// The formatter could not be started.
    #[error("formatter unavailable: {0}")]
    Unavailable(#[source] std::io::Error),
}

/// Canonicalises source text.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Runs an external `gofmt` binary over stdin.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
}

impl Gofmt {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl SourceFormatter for Gofmt {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(FormatError::Unavailable)?;

        // gofmt reads all of stdin before writing, so this cannot deadlock.
        // A program that exits early breaks the pipe; its exit status decides.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(FormatError::Unavailable)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::Rejected(
                stderr.trim().replace("<standard input>", "line"),
            ));
        }

        if let Err(e) = written {
            return Err(FormatError::Rejected(format!(
                "formatter did not read its input: {e}"
            )));
        }

        if output.stdout.is_empty() && !source.trim().is_empty() {
            return Err(FormatError::Rejected("formatter produced no output".into()));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::Rejected(format!("non UTF-8 output: {e}")))
    }
}

/// Leaves text as is (`--no-fmt`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}
