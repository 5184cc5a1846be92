//! Go import rewriting.
//!
//! Recognises import declarations line by line with regex patterns instead of
//! parsing the file. Three positions are matched:
//!
//! ```go
//! import "x.test/m/pkg"              // bare single declaration
//! import alias "x.test/m/pkg"        // aliased single declaration
//! import (
//!     "x.test/m/pkg"                 // grouped block entry
//!     alias "x.test/m/other"
//! )
//! ```
//!
//! Everything outside the matched `[alias] "path"` fragment is passed through
//! byte for byte. Comment lines are never rewritten.

pub mod exact;
pub mod package;
pub mod prefix;

pub use exact::{ExactImportRewriter, rewrite_exact};
pub use package::PackageClauseRewriter;
pub use prefix::{PrefixImportRewriter, rewrite_prefix};

use crate::error::Result;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Optional import alias: an identifier, `_` or `.`, followed by whitespace.
const ALIAS_PATTERN: &str = r"(?:(?P<alias>[\p{L}_]\w*|\.)\s+)?";

/// How the rewritten import is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasPolicy {
    /// Keep an existing alias, never add one.
    Preserve,
    /// Always emit this alias, replacing whatever was there.
    ///
    /// Blank (`_`) and dot (`.`) imports keep their marker.
    Force(String),
}

/// Whether the scan is currently inside an `import ( ... )` group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Outside,
    InsideBlock,
}

impl ScanState {
    /// Steps over one trimmed line.
    ///
    /// Returns the state that applies to the line itself and the state for the
    /// line that follows it.
    pub fn advance(self, trimmed: &str) -> (ScanState, ScanState) {
        match self {
            ScanState::Outside => match block_opening(trimmed) {
                Some(rest) if split_trailing_comment(rest).0.trim_end().ends_with(')') => {
                    (ScanState::InsideBlock, ScanState::Outside)
                }
                Some(_) => (ScanState::InsideBlock, ScanState::InsideBlock),
                None => (ScanState::Outside, ScanState::Outside),
            },
            ScanState::InsideBlock => {
                if split_trailing_comment(trimmed).0.trim_end() == ")" {
                    (ScanState::Outside, ScanState::Outside)
                } else {
                    (ScanState::InsideBlock, ScanState::InsideBlock)
                }
            }
        }
    }
}

/// Returns the text after `import (` if the line opens a group.
fn block_opening(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix("import")?;
    rest.trim_start().strip_prefix('(')
}

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Nothing but comment text (or a blank line inside a `/* */` span).
    Comment,
    /// Entry of an `import ( ... )` group.
    BlockEntry,
    /// Anything else, including single import declarations.
    Code,
}

/// A contiguous run of a line, either code or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub comment: bool,
}

/// Line-by-line classifier threading block and comment state through a file.
#[derive(Debug, Default)]
pub struct LineScanner {
    state: ScanState,
    in_comment: bool,
}

impl LineScanner {
    pub fn classify(&mut self, line: &str) -> LineClass {
        self.scan(line).0
    }

    /// Classifies `line` and splits it into code and comment segments.
    ///
    /// Concatenating the segments yields `line` again.
    pub fn scan<'a>(&mut self, line: &'a str) -> (LineClass, Vec<Segment<'a>>) {
        let segments = self.split_comments(line);

        let code: String = segments
            .iter()
            .filter(|s| !s.comment)
            .map(|s| s.text)
            .collect();
        let trimmed = code.trim();

        if trimmed.is_empty() && segments.iter().any(|s| s.comment) {
            return (LineClass::Comment, segments);
        }

        let (current, next) = self.state.advance(trimmed);
        self.state = next;

        let class = match current {
            ScanState::InsideBlock => LineClass::BlockEntry,
            ScanState::Outside => LineClass::Code,
        };
        (class, segments)
    }

    /// Cuts `line` at `//` and `/* */` boundaries outside string and rune
    /// literals. An unterminated `/*` carries over to the next lines.
    fn split_comments<'a>(&mut self, line: &'a str) -> Vec<Segment<'a>> {
        fn push<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str, comment: bool) {
            if !text.is_empty() {
                segments.push(Segment { text, comment });
            }
        }

        let bytes = line.as_bytes();
        let mut segments = Vec::new();
        let mut quote: Option<u8> = None;
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if self.in_comment {
                if bytes[i..].starts_with(b"*/") {
                    i += 2;
                    push(&mut segments, &line[start..i], true);
                    start = i;
                    self.in_comment = false;
                } else {
                    i += 1;
                }
                continue;
            }

            let b = bytes[i];
            match quote {
                Some(q) if q != b'`' && b == b'\\' => i += 1,
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if matches!(b, b'"' | b'`' | b'\'') => quote = Some(b),
                None if bytes[i..].starts_with(b"//") => {
                    push(&mut segments, &line[start..i], false);
                    push(&mut segments, &line[i..], true);
                    return segments;
                }
                None if bytes[i..].starts_with(b"/*") => {
                    push(&mut segments, &line[start..i], false);
                    start = i;
                    self.in_comment = true;
                    i += 2;
                    continue;
                }
                None => {}
            }
            i += 1;
        }

        push(&mut segments, &line[start..], self.in_comment);
        segments
    }
}

/// Splits a line into its code part and a trailing `//` comment.
///
/// `//` inside interpreted or raw string literals does not start a comment.
pub fn split_trailing_comment(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(b'"') if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'`' => quote = Some(b),
            None if b == b'/' && bytes.get(i + 1) == Some(&b'/') => {
                return line.split_at(i);
            }
            None => {}
        }
        i += 1;
    }

    (line, "")
}

/// Renders the `[alias] "path"` fragment of an import declaration.
pub(crate) fn render_import(alias: Option<&str>, path: &str) -> String {
    match alias {
        Some(alias) => format!("{alias} \"{path}\""),
        None => format!("\"{path}\""),
    }
}

/// An import recognised on a line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ImportMatch<'a> {
    pub alias: Option<&'a str>,
    pub path: &'a str,
}

impl<'a> ImportMatch<'a> {
    fn from_captures(caps: &'a Captures<'_>) -> Self {
        Self {
            alias: caps.name("alias").map(|m| m.as_str()),
            path: caps.name("path").map_or("", |m| m.as_str()),
        }
    }
}

/// Compiled block-entry and single-declaration patterns for one path matcher.
#[derive(Debug)]
pub(crate) struct ImportPattern {
    needle: String,
    block: Regex,
    single: Regex,
}

impl ImportPattern {
    /// Compiles patterns around `path_pattern`, a regex matching the text
    /// between the quotes. Lines not containing `needle` are skipped.
    pub(crate) fn new(path_pattern: &str, needle: &str) -> Result<Self> {
        let fragment = format!(r#"{ALIAS_PATTERN}"(?P<path>{path_pattern})""#);

        Ok(Self {
            needle: needle.to_string(),
            block: Regex::new(&fragment)?,
            single: Regex::new(&format!(r"^(?P<indent>\s*)import\s+{fragment}"))?,
        })
    }

    /// Rewrites every matching import in `content`.
    ///
    /// `replace` maps a recognised import to its new `[alias] "path"` fragment.
    /// Returns `None` if nothing matched.
    pub(crate) fn rewrite<F>(&self, content: &str, mut replace: F) -> Option<String>
    where
        F: FnMut(ImportMatch<'_>) -> String,
    {
        let mut scanner = LineScanner::default();
        let mut changed = false;
        let mut out = String::with_capacity(content.len() + 16);

        for (idx, line) in content.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
            }

            let (class, segments) = scanner.scan(line);
            if class == LineClass::Comment || !line.contains(&self.needle) {
                out.push_str(line);
                continue;
            }

            for (n, segment) in segments.iter().enumerate() {
                if segment.comment {
                    out.push_str(segment.text);
                    continue;
                }

                let code = segment.text;
                let rewritten = match class {
                    LineClass::BlockEntry => {
                        self.block.replace_all(code, |caps: &Captures| {
                            replace(ImportMatch::from_captures(caps))
                        })
                    }
                    // Single declarations start the line.
                    _ if n == 0 => self.single.replace(code, |caps: &Captures| {
                        format!(
                            "{}import {}",
                            &caps["indent"],
                            replace(ImportMatch::from_captures(caps))
                        )
                    }),
                    _ => Cow::Borrowed(code),
                };

                if rewritten != code {
                    changed = true;
                }
                out.push_str(&rewritten);
            }
        }

        changed.then_some(out)
    }
}
