//! Package clause rewriting for files that moved with their directory.

use super::{LineClass, LineScanner};
use crate::error::Result;
use regex::Regex;

/// Rewrites `package <old>` to `package <new>`.
///
/// Only a clause consisting of the keyword and the old identifier alone is
/// matched, so `package di2` or `package di_test` stay as they are.
#[derive(Debug)]
pub struct PackageClauseRewriter {
    new_name: String,
    pattern: Regex,
}

impl PackageClauseRewriter {
    pub fn new(old_name: &str, new_name: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"^(?P<indent>\s*)package\s+{}(?P<trail>\s*)$",
            regex::escape(old_name)
        ))?;

        Ok(Self {
            new_name: new_name.to_string(),
            pattern,
        })
    }

    /// Rewrites the first matching clause outside comments.
    ///
    /// Returns `None` if the file declares a different package.
    pub fn apply(&self, content: &str) -> Option<String> {
        let mut scanner = LineScanner::default();
        let mut replaced = false;
        let mut out = String::with_capacity(content.len() + self.new_name.len());

        for (idx, line) in content.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
            }

            if !replaced && scanner.classify(line) == LineClass::Code {
                if let Some(caps) = self.pattern.captures(line) {
                    out.push_str(&caps["indent"]);
                    out.push_str("package ");
                    out.push_str(&self.new_name);
                    out.push_str(&caps["trail"]);
                    replaced = true;
                    continue;
                }
            }

            out.push_str(line);
        }

        replaced.then_some(out)
    }
}
