//! Validation rules for package directories, module paths and identifiers.
//!
//! Pure functions with no I/O or side effects.

use crate::error::{RenameError, Result};
use std::path::{Component, Path};

/// Go keywords; none of them can name a package or an import alias.
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true if `name` can be used as a package name or import alias.
///
/// `_` is excluded: it is only valid as a blank import marker.
pub fn is_go_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && name != "_"
        && !GO_KEYWORDS.contains(&name)
}

/// Validates a package directory given relative to the project root.
///
/// ## Rules
/// - Not empty, `.` or `..`
/// - Relative path (not absolute)
/// - No `..` components (path traversal)
pub fn validate_relative_dir(path_str: &str) -> Result<()> {
    let trimmed = path_str.trim_end_matches(['/', '\\']);

    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(RenameError::InvalidPath(
            path_str.to_string(),
            "must name a package directory".to_string(),
        ));
    }

    let path = Path::new(trimmed);

    if path.is_absolute() || trimmed.starts_with('/') || trimmed.starts_with('\\') {
        return Err(RenameError::InvalidPath(
            path_str.to_string(),
            "must be relative to the project root".to_string(),
        ));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(RenameError::InvalidPath(
            path_str.to_string(),
            "cannot contain '..'".to_string(),
        ));
    }

    Ok(())
}

/// Validates a module root path such as `github.com/acme/tool`.
///
/// ## Rules
/// - Not empty
/// - No whitespace or quotes
/// - No leading or trailing `/`, no empty, `.` or `..` segments
pub fn validate_module_path(module: &str) -> Result<()> {
    let invalid = |reason: &str| -> Result<()> {
        Err(RenameError::InvalidModule(
            module.to_string(),
            reason.to_string(),
        ))
    };

    if module.is_empty() {
        return invalid("cannot be empty");
    }

    if let Some(ch) = module
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '"' | '`' | '\''))
    {
        return invalid(&format!("invalid character {:?}", ch));
    }

    if module.starts_with('/') || module.ends_with('/') {
        return invalid("cannot start or end with '/'");
    }

    if module
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return invalid("contains an empty, '.' or '..' segment");
    }

    Ok(())
}

/// Converts a directory argument into the slash-separated import suffix.
pub fn to_import_suffix(path_str: &str) -> String {
    path_str
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Last segment of a slash-separated path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
