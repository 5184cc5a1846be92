//! Rewriting of one exact import path (package move).

use super::{AliasPolicy, ImportPattern, render_import};
use crate::error::Result;

/// Rewrites every import of exactly `old_path` to `new_path`.
///
/// Patterns are compiled once and applied to each file of the walk.
#[derive(Debug)]
pub struct ExactImportRewriter {
    old_literal: String,
    new_path: String,
    policy: AliasPolicy,
    pattern: ImportPattern,
}

impl ExactImportRewriter {
    pub fn new(old_path: &str, new_path: &str, policy: AliasPolicy) -> Result<Self> {
        Ok(Self {
            old_literal: format!("\"{old_path}\""),
            new_path: new_path.to_string(),
            policy,
            pattern: ImportPattern::new(&regex::escape(old_path), old_path)?,
        })
    }

    /// Returns `Some(rewritten)` if any import was substituted.
    pub fn apply(&self, content: &str) -> Option<String> {
        if !content.contains(&self.old_literal) {
            return None;
        }

        self.pattern
            .rewrite(content, |import| self.replacement(import.alias))
    }

    fn replacement(&self, existing: Option<&str>) -> String {
        let alias = match (&self.policy, existing) {
            (_, Some(marker @ ("_" | "."))) => Some(marker),
            (AliasPolicy::Force(alias), _) => Some(alias.as_str()),
            (AliasPolicy::Preserve, existing) => existing,
        };

        render_import(alias, &self.new_path)
    }
}

/// One-shot form of [`ExactImportRewriter`]; returns the text unchanged if no
/// import of `old_path` exists.
pub fn rewrite_exact(
    text: &str,
    old_path: &str,
    new_path: &str,
    policy: AliasPolicy,
) -> Result<String> {
    let rewriter = ExactImportRewriter::new(old_path, new_path, policy)?;
    Ok(rewriter.apply(text).unwrap_or_else(|| text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "github.com/pillar/chrop/internal/server/di";
    const NEW: &str = "github.com/pillar/chrop/internal/server/difish";

    fn force(input: &str) -> String {
        rewrite_exact(input, OLD, NEW, AliasPolicy::Force("di".into())).unwrap()
    }

    fn preserve(input: &str, new: &str) -> String {
        rewrite_exact(input, OLD, new, AliasPolicy::Preserve).unwrap()
    }

    #[test]
    fn test_single_line_without_alias_gets_forced_alias() {
        let input = "package main\n\nimport \"github.com/pillar/chrop/internal/server/di\"\n\nfunc main() {\n}";
        let expected = "package main\n\nimport di \"github.com/pillar/chrop/internal/server/difish\"\n\nfunc main() {\n}";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_single_line_existing_alias_replaced_when_forced() {
        let input = "import oldAlias \"github.com/pillar/chrop/internal/server/di\"\n";
        assert_eq!(
            force(input),
            "import di \"github.com/pillar/chrop/internal/server/difish\"\n"
        );
    }

    #[test]
    fn test_block_without_alias() {
        let input = r#"package main

import (
	"github.com/pillar/chrop/internal/server/di"
	"other/package"
)

func main() {
}"#;
        let expected = r#"package main

import (
	di "github.com/pillar/chrop/internal/server/difish"
	"other/package"
)

func main() {
}"#;
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_block_with_existing_alias() {
        let input = "import (\n\toldAlias \"github.com/pillar/chrop/internal/server/di\"\n\t\"other/package\"\n)\n";
        let expected =
            "import (\n\tdi \"github.com/pillar/chrop/internal/server/difish\"\n\t\"other/package\"\n)\n";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_block_aliased_and_bare_rewritten_independently() {
        let input = "import (\n\toldAlias \"github.com/pillar/chrop/internal/server/di\"\n\t\"github.com/pillar/chrop/internal/server/di\"\n)\n";
        let expected = "import (\n\tdi \"github.com/pillar/chrop/internal/server/difish\"\n\tdi \"github.com/pillar/chrop/internal/server/difish\"\n)\n";
        assert_eq!(force(input), expected);

        let moved = "github.com/pillar/chrop/internal/app/di";
        let expected = "import (\n\toldAlias \"github.com/pillar/chrop/internal/app/di\"\n\t\"github.com/pillar/chrop/internal/app/di\"\n)\n";
        assert_eq!(preserve(input, moved), expected);
    }

    #[test]
    fn test_sibling_lines_untouched() {
        let input = "import (\n\t\"fmt\"\n\t\"testing\"\n\t\n\t\"github.com/pillar/chrop/internal/server/di\"\n\t\n\t\"other/package\"\n)\n";
        let output = force(input);

        let before: Vec<_> = input.split('\n').collect();
        let after: Vec<_> = output.split('\n').collect();
        assert_eq!(before.len(), after.len());
        for (idx, (a, b)) in before.iter().zip(&after).enumerate() {
            if idx == 4 {
                assert_eq!(*b, "\tdi \"github.com/pillar/chrop/internal/server/difish\"");
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_mixed_single_and_block() {
        let input = "import \"github.com/pillar/chrop/internal/server/di\"\nimport (\n\t\"other/package\"\n)\n";
        let expected = "import di \"github.com/pillar/chrop/internal/server/difish\"\nimport (\n\t\"other/package\"\n)\n";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_preserves_extra_indentation() {
        let input = "import (\n\t\t\"github.com/pillar/chrop/internal/server/di\"\n)\n";
        let expected = "import (\n\t\tdi \"github.com/pillar/chrop/internal/server/difish\"\n)\n";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_preserve_does_not_add_alias() {
        let moved = "github.com/pillar/chrop/internal/app/di";
        let input = "import \"github.com/pillar/chrop/internal/server/di\"\n";
        assert_eq!(
            preserve(input, moved),
            "import \"github.com/pillar/chrop/internal/app/di\"\n"
        );

        let input = "import (\n\t\"github.com/pillar/chrop/internal/server/di\"\n\t\"other/package\"\n)\n";
        assert_eq!(
            preserve(input, moved),
            "import (\n\t\"github.com/pillar/chrop/internal/app/di\"\n\t\"other/package\"\n)\n"
        );
    }

    #[test]
    fn test_preserve_keeps_existing_alias() {
        let moved = "github.com/pillar/chrop/internal/app/di";
        let input = "import legacy \"github.com/pillar/chrop/internal/server/di\"\n";
        assert_eq!(
            preserve(input, moved),
            "import legacy \"github.com/pillar/chrop/internal/app/di\"\n"
        );
    }

    #[test]
    fn test_no_matching_import_is_noop() {
        let input = "package main\n\nimport \"other/package\"\n\nfunc main() {\n}";
        assert_eq!(force(input), input);

        let rewriter =
            ExactImportRewriter::new(OLD, NEW, AliasPolicy::Force("di".into())).unwrap();
        assert!(rewriter.apply(input).is_none());
    }

    #[test]
    fn test_longer_path_is_not_exact_match() {
        let input = "import \"github.com/pillar/chrop/internal/server/di/sub\"\n";
        assert_eq!(force(input), input);
    }

    #[test]
    fn test_commented_import_untouched() {
        let input = "// import \"github.com/pillar/chrop/internal/server/di\"\nimport \"other/package\"\n";
        assert_eq!(force(input), input);

        let input = "/* import \"github.com/pillar/chrop/internal/server/di\"\n\"github.com/pillar/chrop/internal/server/di\"\n*/\n";
        assert_eq!(force(input), input);
    }

    #[test]
    fn test_inline_block_comment_untouched() {
        let output = rewrite_exact(
            "import (\n\t\"a/b\" /* was \"a/b\" */\n)\n",
            "a/b",
            "a/c",
            AliasPolicy::Preserve,
        )
        .unwrap();
        assert_eq!(output, "import (\n\t\"a/c\" /* was \"a/b\" */\n)\n");
    }

    #[test]
    fn test_block_comment_opened_mid_line() {
        let input = "var x = 1 /* start\nimport \"a/b\"\n*/\n";
        let output = rewrite_exact(input, "a/b", "a/c", AliasPolicy::Preserve).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_string_literal_in_code_untouched() {
        let input = "func f() string {\n\treturn \"github.com/pillar/chrop/internal/server/di\"\n}\n";
        assert_eq!(force(input), input);
    }

    #[test]
    fn test_trailing_comment_kept() {
        let input = "import (\n\t\"github.com/pillar/chrop/internal/server/di\" // see \"github.com/pillar/chrop/internal/server/di\"\n)\n";
        let expected = "import (\n\tdi \"github.com/pillar/chrop/internal/server/difish\" // see \"github.com/pillar/chrop/internal/server/di\"\n)\n";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_blank_and_dot_imports_keep_marker() {
        let input = "import (\n\t_ \"github.com/pillar/chrop/internal/server/di\"\n)\nimport . \"github.com/pillar/chrop/internal/server/di\"\n";
        let expected = "import (\n\t_ \"github.com/pillar/chrop/internal/server/difish\"\n)\nimport . \"github.com/pillar/chrop/internal/server/difish\"\n";
        assert_eq!(force(input), expected);
    }

    #[test]
    fn test_package_move_single_line() {
        let output = rewrite_exact(
            "import \"x.test/m/internal/server/di\"",
            "x.test/m/internal/server/di",
            "x.test/m/internal/server/difish",
            AliasPolicy::Force("di".into()),
        )
        .unwrap();
        assert_eq!(output, "import di \"x.test/m/internal/server/difish\"");
    }

    #[test]
    fn test_idempotent_second_pass() {
        let input = "import (\n\t\"github.com/pillar/chrop/internal/server/di\"\n)\n";
        let once = force(input);
        assert_eq!(force(&once), once);
    }
}
