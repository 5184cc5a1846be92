//! Rewriting of every import under a path prefix (module rename).

use super::{ImportPattern, render_import};
use crate::error::Result;

/// Rewrites imports equal to `old_prefix` or under `old_prefix/`.
///
/// Aliases are carried over verbatim and never introduced.
#[derive(Debug)]
pub struct PrefixImportRewriter {
    old_prefix: String,
    new_prefix: String,
    pattern: ImportPattern,
}

impl PrefixImportRewriter {
    pub fn new(old_prefix: &str, new_prefix: &str) -> Result<Self> {
        let path_pattern = format!(r#"{}(?:/[^"]*)?"#, regex::escape(old_prefix));

        Ok(Self {
            old_prefix: old_prefix.to_string(),
            new_prefix: new_prefix.to_string(),
            pattern: ImportPattern::new(&path_pattern, old_prefix)?,
        })
    }

    /// Returns `Some(rewritten)` if any import was substituted.
    pub fn apply(&self, content: &str) -> Option<String> {
        if !content.contains(&self.old_prefix) {
            return None;
        }

        self.pattern.rewrite(content, |import| {
            let rest = &import.path[self.old_prefix.len()..];
            render_import(import.alias, &format!("{}{}", self.new_prefix, rest))
        })
    }
}

/// One-shot form of [`PrefixImportRewriter`].
pub fn rewrite_prefix(text: &str, old_prefix: &str, new_prefix: &str) -> Result<String> {
    let rewriter = PrefixImportRewriter::new(old_prefix, new_prefix)?;
    Ok(rewriter.apply(text).unwrap_or_else(|| text.to_string()))
}
