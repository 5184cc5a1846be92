//! `go.mod` module declaration reading and updating.
//!
//! Only the first `module <path>` line is recognised; every other byte of the
//! manifest is preserved on write.

use crate::error::{RenameError, Result};
use std::fs;
use std::path::Path;

/// File name of the module manifest.
pub const GO_MOD: &str = "go.mod";

const MODULE_KEYWORD: &str = "module";

/// Returns the module root declared in `content`.
pub fn parse_module_root(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        if tokens.next()? != MODULE_KEYWORD {
            return None;
        }
        tokens.next().map(unquote)
    })
}

/// Replaces the path on the first module declaration line.
///
/// Leading indentation is kept. Returns `None` if there is no declaration.
pub fn update_module_root(content: &str, new_root: &str) -> Option<String> {
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    let idx = lines.iter().position(|line| {
        let mut tokens = line.split_whitespace();
        tokens.next() == Some(MODULE_KEYWORD) && tokens.next().is_some()
    })?;

    let line = &lines[idx];
    let indent_len = line.len() - line.trim_start().len();
    let eol = if line.ends_with('\r') { "\r" } else { "" };
    lines[idx] = format!("{}{} {}{}", &line[..indent_len], MODULE_KEYWORD, new_root, eol);

    Some(lines.join("\n"))
}

/// Reads the module root from the manifest at `go_mod`.
///
/// # Errors
///
/// - `Io`: manifest cannot be read
/// - `ManifestNotFound`: no module declaration
pub fn read_module_root(go_mod: &Path) -> Result<String> {
    let content =
        fs::read_to_string(go_mod).map_err(|e| RenameError::io_context("read", go_mod, e))?;

    parse_module_root(&content).ok_or_else(|| RenameError::ManifestNotFound(go_mod.to_path_buf()))
}

/// Writes `new_root` into the module declaration of the manifest at `go_mod`.
///
/// The manifest is left untouched when no declaration exists.
pub fn write_module_root(go_mod: &Path, new_root: &str) -> Result<()> {
    let content =
        fs::read_to_string(go_mod).map_err(|e| RenameError::io_context("read", go_mod, e))?;

    let updated = update_module_root(&content, new_root)
        .ok_or_else(|| RenameError::ManifestNotFound(go_mod.to_path_buf()))?;

    if updated != content {
        fs::write(go_mod, updated).map_err(|e| RenameError::io_context("write", go_mod, e))?;
        log::debug!("Updated module declaration in {}", go_mod.display());
    }

    Ok(())
}

fn unquote(token: &str) -> String {
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| token.strip_prefix('`').and_then(|t| t.strip_suffix('`')))
        .unwrap_or(token)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MANIFEST: &str = "module github.com/pillar/chrop\n\ngo 1.22\n\nrequire (\n\tgithub.com/urfave/cli/v2 v2.27.1\n)\n";

    #[test]
    fn test_parse_module_root() {
        assert_eq!(
            parse_module_root(MANIFEST).as_deref(),
            Some("github.com/pillar/chrop")
        );
    }

    #[test]
    fn test_parse_skips_comments_and_bare_keyword() {
        let content = "// module not/this\nmodule\n  module   x.test/m   // trailing\n";
        assert_eq!(parse_module_root(content).as_deref(), Some("x.test/m"));
    }

    #[test]
    fn test_parse_quoted_module() {
        assert_eq!(
            parse_module_root("module \"x.test/m\"\n").as_deref(),
            Some("x.test/m")
        );
    }

    #[test]
    fn test_parse_missing_declaration() {
        assert!(parse_module_root("go 1.22\n").is_none());
    }

    #[test]
    fn test_update_preserves_rest() {
        let updated = update_module_root(MANIFEST, "github.com/pillar/doaddon").unwrap();
        assert_eq!(
            updated,
            MANIFEST.replace("github.com/pillar/chrop", "github.com/pillar/doaddon")
        );
    }

    #[test]
    fn test_update_preserves_indentation() {
        let updated = update_module_root("\tmodule x.test/m\r\ngo 1.22\r\n", "x.test/new").unwrap();
        assert_eq!(updated, "\tmodule x.test/new\r\ngo 1.22\r\n");
    }

    #[test]
    fn test_update_only_first_declaration() {
        let updated = update_module_root("module a/b\nmodule c/d\n", "x/y").unwrap();
        assert_eq!(updated, "module x/y\nmodule c/d\n");
    }

    #[test]
    fn test_read_and_write_roundtrip_on_disk() {
        let temp = TempDir::new().unwrap();
        let go_mod = temp.path().join(GO_MOD);
        fs::write(&go_mod, MANIFEST).unwrap();

        assert_eq!(read_module_root(&go_mod).unwrap(), "github.com/pillar/chrop");

        write_module_root(&go_mod, "github.com/pillar/doaddon").unwrap();
        assert_eq!(
            read_module_root(&go_mod).unwrap(),
            "github.com/pillar/doaddon"
        );
        assert!(fs::read_to_string(&go_mod).unwrap().contains("go 1.22"));
    }

    #[test]
    fn test_write_without_declaration_leaves_file() {
        let temp = TempDir::new().unwrap();
        let go_mod = temp.path().join(GO_MOD);
        fs::write(&go_mod, "go 1.22\n").unwrap();

        let err = write_module_root(&go_mod, "x/y").unwrap_err();
        assert!(matches!(err, RenameError::ManifestNotFound(_)));
        assert_eq!(fs::read_to_string(&go_mod).unwrap(), "go 1.22\n");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_module_root(&temp.path().join(GO_MOD)).unwrap_err();
        assert!(matches!(err, RenameError::Io(_)));
    }
}
